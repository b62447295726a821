use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::task::{Task, TaskId};
use crate::service::session::Mode;

/// One rendered row. Built fresh for every frame so the position is never
/// held across an event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub position: usize,
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub due: Option<NaiveDate>,
    pub past_due: bool,

    // Per-row interaction state, looked up by id.
    pub editing: bool,
    pub revealed: bool,
    pub pending_delete: bool,
}

impl TaskRow {
    pub fn from_entity(position: usize, task: &Task, mode: &Mode, today: NaiveDate) -> Self {
        let id = task.id;
        Self {
            position,
            id,
            text: task.text().to_string(),
            completed: task.completed,
            due: task.due,
            past_due: task.is_past_due(today),
            editing: matches!(mode, Mode::Editing { id: m, .. } if *m == id),
            revealed: matches!(mode, Mode::Revealed { id: m } if *m == id),
            pending_delete: matches!(mode, Mode::ConfirmingDelete { id: m } if *m == id),
        }
    }

    /// Short label for the due column: "today", "tomorrow", or `MM-DD`.
    pub fn due_label(&self, today: NaiveDate) -> String {
        match self.due {
            None => "-".to_string(),
            Some(d) if d == today => "today".to_string(),
            Some(d) if today.succ_opt() == Some(d) => "tomorrow".to_string(),
            Some(d) => d.format("%m-%d").to_string(),
        }
    }
}
