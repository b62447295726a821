use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::task::Task;

/// Where completed tasks land relative to pending ones.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompletedPlacement {
    /// Pending tasks first, completed tasks demoted to the end.
    Bottom,
    /// Completed tasks first.
    Top,
}

impl Default for CompletedPlacement {
    fn default() -> Self {
        CompletedPlacement::Bottom
    }
}

/// Total order over tasks: completion group, then dated before undated,
/// then earlier due date first.
pub fn compare_tasks(a: &Task, b: &Task, placement: CompletedPlacement) -> Ordering {
    let by_completion = match placement {
        CompletedPlacement::Bottom => a.completed.cmp(&b.completed),
        CompletedPlacement::Top => b.completed.cmp(&a.completed),
    };

    by_completion.then_with(|| match (a.due, b.due) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

// `sort_by` is stable, so equal tasks keep their prior relative order.
pub fn sort_tasks(tasks: &mut [Task], placement: CompletedPlacement) {
    tasks.sort_by(|a, b| compare_tasks(a, b, placement));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(text: &str, completed: bool, due: Option<(i32, u32, u32)>) -> Task {
        let due = due.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        let mut t = Task::new(text, due).unwrap();
        t.completed = completed;
        t
    }

    fn texts(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.text()).collect()
    }

    #[test]
    fn test_due_date_ordering() {
        let mut tasks = vec![
            task("X", false, Some((2025, 1, 10))),
            task("Y", false, Some((2025, 1, 5))),
            task("Z", false, None),
        ];
        sort_tasks(&mut tasks, CompletedPlacement::Bottom);
        assert_eq!(texts(&tasks), vec!["Y", "X", "Z"]);
    }

    #[test]
    fn test_completed_at_bottom() {
        let mut tasks = vec![
            task("Q", true, None),
            task("P", false, Some((2025, 1, 1))),
        ];
        sort_tasks(&mut tasks, CompletedPlacement::Bottom);
        assert_eq!(texts(&tasks), vec!["P", "Q"]);
    }

    #[test]
    fn test_completed_at_top() {
        let mut tasks = vec![
            task("P", false, Some((2025, 1, 1))),
            task("Q", true, None),
        ];
        sort_tasks(&mut tasks, CompletedPlacement::Top);
        assert_eq!(texts(&tasks), vec!["Q", "P"]);
    }

    #[test]
    fn test_ties_are_stable() {
        let mut tasks = vec![
            task("first", false, None),
            task("second", false, None),
            task("third", false, Some((2025, 2, 1))),
            task("fourth", false, Some((2025, 2, 1))),
        ];
        sort_tasks(&mut tasks, CompletedPlacement::Bottom);
        assert_eq!(texts(&tasks), vec!["third", "fourth", "first", "second"]);
    }

    #[test]
    fn test_due_order_applies_within_completed_group() {
        let mut tasks = vec![
            task("late", true, Some((2025, 5, 1))),
            task("none", true, None),
            task("early", true, Some((2025, 4, 1))),
            task("open", false, None),
        ];
        sort_tasks(&mut tasks, CompletedPlacement::Bottom);
        assert_eq!(texts(&tasks), vec!["open", "early", "late", "none"]);
    }
}
