use chrono::{NaiveDate, TimeDelta};
use tracing::debug;

use crate::input::{complete_tag, parse_add_line, trailing_tag_query};
use crate::model::ordering::CompletedPlacement;
use crate::model::tag::{Tag, TagSet};
use crate::model::task::TaskId;
use crate::model::task_list::{TaskList, TaskListError};
use crate::service::dto::TaskRow;
use crate::time::suggest_due;

/// What the screen is doing right now. Only one interaction is open at a time,
/// so e.g. editing while a delete confirmation is showing cannot happen.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Idle,
    Adding {
        input: String,
        suggested: Option<NaiveDate>,
        accept_suggestion: bool,
    },
    Editing {
        id: TaskId,
        buffer: String,
    },
    /// Quick-delete action shown on one row (the swipe gesture).
    Revealed {
        id: TaskId,
    },
    ConfirmingDelete {
        id: TaskId,
    },
    PickingDate {
        id: TaskId,
        date: NaiveDate,
    },
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Adding { .. } => "adding",
            Mode::Editing { .. } => "editing",
            Mode::Revealed { .. } => "revealed",
            Mode::ConfirmingDelete { .. } => "confirming-delete",
            Mode::PickingDate { .. } => "picking-date",
        }
    }

    // Idle and a revealed row both accept new row-level actions.
    fn accepts_row_action(&self) -> bool {
        matches!(self, Mode::Idle | Mode::Revealed { .. })
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("cannot {action} while {mode}")]
    InvalidTransition {
        action: &'static str,
        mode: &'static str,
    },
    #[error(transparent)]
    List(#[from] TaskListError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// A task list plus the interaction state around it.
#[derive(Debug, Clone)]
pub struct Session {
    list: TaskList,
    mode: Mode,
    tags: TagSet,
    today: NaiveDate,
}

impl Session {
    pub fn new(placement: CompletedPlacement, tags: TagSet, today: NaiveDate) -> Self {
        Self {
            list: TaskList::new(placement),
            mode: Mode::Idle,
            tags,
            today,
        }
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Moves the session's notion of today, e.g. when the clock passes midnight.
    /// An open add line re-runs keyword detection against the new day.
    pub fn set_today(&mut self, today: NaiveDate) {
        if self.today == today {
            return;
        }
        self.today = today;
        if let Mode::Adding { input, .. } = &self.mode {
            let input = input.clone();
            self.update_add_input(input);
        }
    }

    pub fn rows(&self) -> Vec<TaskRow> {
        self.list
            .tasks()
            .iter()
            .enumerate()
            .map(|(i, t)| TaskRow::from_entity(i, t, &self.mode, self.today))
            .collect()
    }

    fn refuse(&self, action: &'static str) -> SessionError {
        debug!(action, mode = self.mode.name(), "transition refused");
        SessionError::InvalidTransition {
            action,
            mode: self.mode.name(),
        }
    }

    /// Closes whatever interaction is open without applying it.
    pub fn cancel(&mut self) {
        self.mode = Mode::Idle;
    }

    // --- Adding ---

    pub fn start_add(&mut self) -> Result<()> {
        if !self.mode.accepts_row_action() {
            return Err(self.refuse("add"));
        }
        self.mode = Mode::Adding {
            input: String::new(),
            suggested: None,
            accept_suggestion: false,
        };
        Ok(())
    }

    /// Replaces the add line and re-runs date keyword detection on it.
    pub fn set_add_input(&mut self, input: String) -> Result<()> {
        if !matches!(self.mode, Mode::Adding { .. }) {
            return Err(self.refuse("type a new task"));
        }
        self.update_add_input(input);
        Ok(())
    }

    fn update_add_input(&mut self, new_input: String) {
        let detected = suggest_due(&new_input, self.today);
        if let Mode::Adding {
            input,
            suggested,
            accept_suggestion,
        } = &mut self.mode
        {
            if *suggested != detected {
                *accept_suggestion = false;
            }
            *suggested = detected;
            *input = new_input;
        }
    }

    pub fn add_input(&self) -> Option<&str> {
        match &self.mode {
            Mode::Adding { input, .. } => Some(input),
            _ => None,
        }
    }

    /// Flips whether the detected date will be attached on submit.
    pub fn toggle_suggestion(&mut self) -> Result<()> {
        if let Mode::Adding {
            suggested: Some(_),
            accept_suggestion,
            ..
        } = &mut self.mode
        {
            *accept_suggestion = !*accept_suggestion;
            return Ok(());
        }
        Err(self.refuse("accept a date suggestion"))
    }

    pub fn tag_suggestions(&self) -> Vec<&Tag> {
        match self.add_input().and_then(trailing_tag_query) {
            Some(query) => self.tags.filter(query),
            None => Vec::new(),
        }
    }

    /// Completes the trailing `#query` with the closest tag. Returns false when
    /// there is nothing to complete.
    pub fn complete_tag(&mut self) -> Result<bool> {
        let Some(input) = self.add_input() else {
            return Err(self.refuse("complete a tag"));
        };
        let Some(tag) = self.tag_suggestions().first().map(|t| t.text.clone()) else {
            return Ok(false);
        };
        let completed = complete_tag(input, &tag);
        self.update_add_input(completed);
        Ok(true)
    }

    /// Adds the typed task and closes the add line. An explicit `due:` token
    /// wins over an accepted keyword suggestion.
    pub fn submit_add(&mut self) -> Result<TaskId> {
        match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::Adding {
                input,
                suggested,
                accept_suggestion,
            } => {
                let line = parse_add_line(&input, self.today);
                let due = line.due.or(suggested.filter(|_| accept_suggestion));
                Ok(self.list.add(&line.text, due)?)
            }
            other => {
                self.mode = other;
                Err(self.refuse("submit a new task"))
            }
        }
    }

    // --- Row actions ---

    pub fn toggle(&mut self, id: TaskId) -> Result<()> {
        if !self.mode.accepts_row_action() {
            return Err(self.refuse("toggle"));
        }
        self.list.toggle(id)?;
        self.mode = Mode::Idle;
        Ok(())
    }

    pub fn begin_edit(&mut self, id: TaskId) -> Result<()> {
        if !self.mode.accepts_row_action() {
            return Err(self.refuse("edit"));
        }
        let buffer = self.list.begin_edit(id)?.to_string();
        self.mode = Mode::Editing { id, buffer };
        Ok(())
    }

    pub fn set_edit_buffer(&mut self, text: String) -> Result<()> {
        if let Mode::Editing { buffer, .. } = &mut self.mode {
            *buffer = text;
            return Ok(());
        }
        Err(self.refuse("type an edit"))
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        match &self.mode {
            Mode::Editing { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    /// Writes the edit back and leaves edit mode. A blank buffer is discarded.
    pub fn commit_edit(&mut self) -> Result<()> {
        let Mode::Editing { id, buffer } = &self.mode else {
            return Err(self.refuse("commit an edit"));
        };
        let (id, buffer) = (*id, buffer.clone());
        self.mode = Mode::Idle;
        self.list.commit_edit(id, &buffer)?;
        Ok(())
    }

    /// Shows the quick-delete action on `id`, closing any other open row.
    pub fn reveal(&mut self, id: TaskId) -> Result<()> {
        if !self.mode.accepts_row_action() {
            return Err(self.refuse("reveal delete"));
        }
        if self.list.get(id).is_none() {
            return Err(TaskListError::NotFound(id).into());
        }
        self.mode = Mode::Revealed { id };
        Ok(())
    }

    /// Deletes the revealed row without asking.
    pub fn quick_delete(&mut self) -> Result<()> {
        let Mode::Revealed { id } = self.mode else {
            return Err(self.refuse("quick delete"));
        };
        self.mode = Mode::Idle;
        self.list.delete(id)?;
        Ok(())
    }

    pub fn request_delete(&mut self, id: TaskId) -> Result<()> {
        if !self.mode.accepts_row_action() {
            return Err(self.refuse("delete"));
        }
        if self.list.get(id).is_none() {
            return Err(TaskListError::NotFound(id).into());
        }
        self.mode = Mode::ConfirmingDelete { id };
        Ok(())
    }

    pub fn confirm_delete(&mut self) -> Result<()> {
        let Mode::ConfirmingDelete { id } = self.mode else {
            return Err(self.refuse("confirm delete"));
        };
        self.mode = Mode::Idle;
        self.list.delete(id)?;
        Ok(())
    }

    // --- Date picker ---

    /// Opens the picker on the task's current due date, or today.
    pub fn begin_pick_date(&mut self, id: TaskId) -> Result<()> {
        if !self.mode.accepts_row_action() {
            return Err(self.refuse("pick a date"));
        }
        let task = self.list.get(id).ok_or(TaskListError::NotFound(id))?;
        let date = task.due.unwrap_or(self.today);
        self.mode = Mode::PickingDate { id, date };
        Ok(())
    }

    pub fn shift_picked_date(&mut self, days: i64) -> Result<()> {
        if let Mode::PickingDate { date, .. } = &mut self.mode {
            // Stays put at the edge of the calendar.
            let next = TimeDelta::try_days(days).and_then(|d| date.checked_add_signed(d));
            if let Some(next) = next {
                *date = next;
            }
            return Ok(());
        }
        Err(self.refuse("move the date"))
    }

    pub fn pick_today(&mut self) -> Result<()> {
        let today = self.today;
        if let Mode::PickingDate { date, .. } = &mut self.mode {
            *date = today;
            return Ok(());
        }
        Err(self.refuse("jump to today"))
    }

    pub fn confirm_date(&mut self) -> Result<()> {
        let Mode::PickingDate { id, date } = self.mode else {
            return Err(self.refuse("confirm a date"));
        };
        self.mode = Mode::Idle;
        self.list.assign_due(id, date)?;
        Ok(())
    }

    pub fn clear_date(&mut self) -> Result<()> {
        let Mode::PickingDate { id, .. } = self.mode else {
            return Err(self.refuse("clear a date"));
        };
        self.mode = Mode::Idle;
        self.list.clear_due(id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn session() -> Session {
        Session::new(CompletedPlacement::Bottom, TagSet::defaults(), today())
    }

    fn add(s: &mut Session, text: &str) -> TaskId {
        s.start_add().unwrap();
        s.set_add_input(text.to_string()).unwrap();
        s.submit_add().unwrap()
    }

    #[test]
    fn test_suggestion_follows_input() {
        let mut s = session();
        s.start_add().unwrap();
        s.set_add_input("call mom tmrw".to_string()).unwrap();
        assert!(matches!(
            s.mode(),
            Mode::Adding { suggested: Some(d), .. } if *d == today() + TimeDelta::days(1)
        ));

        s.set_add_input("call mom".to_string()).unwrap();
        assert!(matches!(s.mode(), Mode::Adding { suggested: None, .. }));
    }

    #[test]
    fn test_suggestion_needs_acceptance() {
        let mut s = session();
        let plain = add(&mut s, "gym today");
        assert_eq!(s.list().get(plain).unwrap().due, None);

        s.start_add().unwrap();
        s.set_add_input("gym today".to_string()).unwrap();
        s.toggle_suggestion().unwrap();
        let dated = s.submit_add().unwrap();
        assert_eq!(s.list().get(dated).unwrap().due, Some(today()));
        assert_eq!(s.mode(), &Mode::Idle);
    }

    #[test]
    fn test_changed_suggestion_drops_acceptance() {
        let mut s = session();
        s.start_add().unwrap();
        s.set_add_input("gym today".to_string()).unwrap();
        s.toggle_suggestion().unwrap();
        s.set_add_input("gym today tomorrow".to_string()).unwrap();
        assert!(matches!(
            s.mode(),
            Mode::Adding { accept_suggestion: false, .. }
        ));
    }

    #[test]
    fn test_toggle_suggestion_without_date_is_refused() {
        let mut s = session();
        s.start_add().unwrap();
        assert!(s.toggle_suggestion().is_err());
    }

    #[test]
    fn test_blank_submit_closes_input() {
        let mut s = session();
        s.start_add().unwrap();
        s.set_add_input("   ".to_string()).unwrap();
        assert_eq!(
            s.submit_add(),
            Err(SessionError::List(TaskListError::BlankText))
        );
        assert!(s.list().is_empty());
        assert_eq!(s.mode(), &Mode::Idle);
    }

    #[test]
    fn test_out_of_range_due_stays_in_text() {
        let mut s = session();
        let id = add(&mut s, "pay rent due:+1000000000d");
        let task = s.list().get(id).unwrap();
        assert_eq!(task.text(), "pay rent due:+1000000000d");
        assert_eq!(task.due, None);
    }

    #[test]
    fn test_picker_stops_at_calendar_edge() {
        let mut s = session();
        let id = add(&mut s, "far away");
        s.list.assign_due(id, NaiveDate::MAX).unwrap();
        s.begin_pick_date(id).unwrap();
        s.shift_picked_date(7).unwrap();
        assert_eq!(s.mode(), &Mode::PickingDate { id, date: NaiveDate::MAX });
    }

    #[test]
    fn test_tag_completion() {
        let mut s = session();
        s.start_add().unwrap();
        s.set_add_input("buy milk #shop".to_string()).unwrap();
        let names: Vec<&str> = s.tag_suggestions().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(names, vec!["shopping"]);
        assert_eq!(s.complete_tag(), Ok(true));
        assert_eq!(s.add_input(), Some("buy milk #shopping "));
        assert_eq!(s.complete_tag(), Ok(false));
    }

    #[test]
    fn test_edit_refused_while_confirming_delete() {
        let mut s = session();
        let id = add(&mut s, "thing");
        s.request_delete(id).unwrap();

        assert!(matches!(
            s.begin_edit(id),
            Err(SessionError::InvalidTransition { .. })
        ));
        assert!(s.toggle(id).is_err());
        assert_eq!(s.mode(), &Mode::ConfirmingDelete { id });
    }

    #[test]
    fn test_edit_refused_on_completed() {
        let mut s = session();
        let id = add(&mut s, "done");
        s.toggle(id).unwrap();
        assert_eq!(
            s.begin_edit(id),
            Err(SessionError::List(TaskListError::Completed(id)))
        );
        assert_eq!(s.mode(), &Mode::Idle);
    }

    #[test]
    fn test_edit_commit_and_discard() {
        let mut s = session();
        let id = add(&mut s, "draft");

        s.begin_edit(id).unwrap();
        assert_eq!(s.edit_buffer(), Some("draft"));
        s.set_edit_buffer("  final  ".to_string()).unwrap();
        s.commit_edit().unwrap();
        assert_eq!(s.list().get(id).unwrap().text(), "final");

        s.begin_edit(id).unwrap();
        s.set_edit_buffer("  ".to_string()).unwrap();
        assert!(s.commit_edit().is_err());
        assert_eq!(s.list().get(id).unwrap().text(), "final");
        assert_eq!(s.mode(), &Mode::Idle);
    }

    #[test]
    fn test_cancel_delete_keeps_task() {
        let mut s = session();
        let id = add(&mut s, "keep me");
        s.request_delete(id).unwrap();
        s.cancel();
        assert_eq!(s.mode(), &Mode::Idle);
        assert!(s.list().get(id).is_some());
    }

    #[test]
    fn test_confirm_delete() {
        let mut s = session();
        let id = add(&mut s, "drop me");
        add(&mut s, "stay");
        s.request_delete(id).unwrap();
        s.confirm_delete().unwrap();
        assert!(s.list().get(id).is_none());
        assert_eq!(s.list().len(), 1);
    }

    #[test]
    fn test_quick_delete_requires_reveal() {
        let mut s = session();
        let a = add(&mut s, "a");
        let b = add(&mut s, "b");
        assert!(s.quick_delete().is_err());

        s.reveal(a).unwrap();
        s.reveal(b).unwrap();
        assert_eq!(s.mode(), &Mode::Revealed { id: b });
        s.quick_delete().unwrap();
        assert!(s.list().get(b).is_none());
        assert!(s.list().get(a).is_some());
    }

    #[test]
    fn test_rows_track_mode_by_id() {
        let mut s = session();
        let a = add(&mut s, "a");
        add(&mut s, "b");
        s.reveal(a).unwrap();

        let rows = s.rows();
        let revealed: Vec<bool> = rows.iter().map(|r| r.revealed).collect();
        assert_eq!(revealed, vec![true, false]);
        assert_eq!(rows[1].position, 1);
    }

    #[test]
    fn test_pick_date_flow() {
        let mut s = session();
        let x = add(&mut s, "x due:+5d");
        let y = add(&mut s, "y");

        s.begin_pick_date(y).unwrap();
        assert_eq!(s.mode(), &Mode::PickingDate { id: y, date: today() });
        s.shift_picked_date(1).unwrap();
        s.confirm_date().unwrap();

        assert_eq!(s.list().get(y).unwrap().due, Some(today() + TimeDelta::days(1)));
        assert_eq!(s.list().position_of(y), Some(0));
        assert_eq!(s.list().position_of(x), Some(1));

        s.begin_pick_date(y).unwrap();
        s.clear_date().unwrap();
        assert_eq!(s.list().get(y).unwrap().due, None);
        assert_eq!(s.list().position_of(y), Some(1));
    }

    #[test]
    fn test_picker_opens_on_existing_due() {
        let mut s = session();
        let id = add(&mut s, "x due:+5d");
        s.begin_pick_date(id).unwrap();
        s.shift_picked_date(-10).unwrap();
        s.pick_today().unwrap();
        assert_eq!(s.mode(), &Mode::PickingDate { id, date: today() });
    }

    #[test]
    fn test_set_today_rechecks_suggestion() {
        let mut s = session();
        s.start_add().unwrap();
        s.set_add_input("tomorrow".to_string()).unwrap();
        let next = today() + TimeDelta::days(1);
        s.set_today(next);
        assert!(matches!(
            s.mode(),
            Mode::Adding { suggested: Some(d), .. } if *d == next + TimeDelta::days(1)
        ));
    }
}
