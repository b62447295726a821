use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use swipedo_core::{
    levenshtein, suggest_due, CompletedPlacement, Mode, Session, SessionError, TagSet, TaskList,
    TaskListError,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
}

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
}

fn texts(list: &TaskList) -> Vec<String> {
    list.tasks().iter().map(|t| t.text().to_string()).collect()
}

fn type_and_submit(session: &mut Session, line: &str) -> Result<swipedo_core::TaskId, SessionError> {
    session.start_add()?;
    session.set_add_input(line.to_string())?;
    session.submit_add()
}

#[test]
fn add_toggle_edit_delete_roundtrip() {
    let mut session = Session::new(CompletedPlacement::Bottom, TagSet::defaults(), today());

    let milk = type_and_submit(&mut session, "  buy milk  ").unwrap();
    let bread = type_and_submit(&mut session, "buy bread").unwrap();
    assert_eq!(texts(session.list()), vec!["buy milk", "buy bread"]);

    // Position 0 is resolved to an id only at the moment of the action.
    let first = session.list().id_at(0).unwrap();
    assert_eq!(first, milk);
    session.toggle(first).unwrap();
    assert_eq!(texts(session.list()), vec!["buy bread", "buy milk"]);

    // Completed tasks refuse edits.
    assert_eq!(
        session.begin_edit(milk),
        Err(SessionError::List(TaskListError::Completed(milk)))
    );

    session.begin_edit(bread).unwrap();
    session.set_edit_buffer("buy rye bread".to_string()).unwrap();
    session.commit_edit().unwrap();
    assert_eq!(texts(session.list()), vec!["buy rye bread", "buy milk"]);

    session.request_delete(bread).unwrap();
    assert_eq!(session.mode(), &Mode::ConfirmingDelete { id: bread });
    session.confirm_delete().unwrap();
    assert_eq!(texts(session.list()), vec!["buy milk"]);

    // The old id of a deleted task is a no-op, not a panic.
    assert!(session.toggle(bread).is_err());
    assert_eq!(texts(session.list()), vec!["buy milk"]);
}

#[test]
fn due_dates_order_the_list() {
    let mut list = TaskList::default();
    list.add("X", Some(jan(10))).unwrap();
    list.add("Y", Some(jan(5))).unwrap();
    list.add("Z", None).unwrap();
    assert_eq!(texts(&list), vec!["Y", "X", "Z"]);
}

#[test]
fn completion_direction_is_configurable() {
    let mut bottom = TaskList::new(CompletedPlacement::Bottom);
    let mut top = TaskList::new(CompletedPlacement::Top);
    for list in [&mut bottom, &mut top] {
        list.add("P", Some(jan(1))).unwrap();
        let q = list.add("Q", None).unwrap();
        list.toggle(q).unwrap();
    }
    assert_eq!(texts(&bottom), vec!["P", "Q"]);
    assert_eq!(texts(&top), vec!["Q", "P"]);

    bottom.set_placement(CompletedPlacement::Top);
    assert_eq!(texts(&bottom), vec!["Q", "P"]);
}

#[test]
fn keyword_suggestion_and_explicit_due() {
    assert_eq!(
        suggest_due("call mom tomorrow today", today()),
        Some(today() + Duration::days(1))
    );

    let mut session = Session::new(CompletedPlacement::Bottom, TagSet::defaults(), today());
    session.start_add().unwrap();
    session
        .set_add_input("dentist tomorrow due:2025-02-01".to_string())
        .unwrap();
    session.toggle_suggestion().unwrap();
    let id = session.submit_add().unwrap();

    let task = session.list().get(id).unwrap();
    assert_eq!(task.text(), "dentist tomorrow");
    assert_eq!(task.due, NaiveDate::from_ymd_opt(2025, 2, 1));
}

#[test]
fn past_due_rows() {
    let mut session = Session::new(CompletedPlacement::Bottom, TagSet::default(), today());
    type_and_submit(&mut session, "late due:2025-01-07").unwrap();
    type_and_submit(&mut session, "on time due:today").unwrap();

    let flags: Vec<(String, bool)> = session
        .rows()
        .into_iter()
        .map(|r| (r.text, r.past_due))
        .collect();
    assert_eq!(
        flags,
        vec![("late".to_string(), true), ("on time".to_string(), false)]
    );
}

#[test]
fn edit_distance() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
}
