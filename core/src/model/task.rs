use std::fmt;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a task. Positions change on every re-sort, ids never do.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        TaskId(Uuid::new_v4())
    }

    /// First eight hex digits, enough to tell rows apart on screen.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    text: String,
    pub completed: bool,
    // Day granularity only; the time of day never matters for ordering or past-due.
    pub due: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Builds a pending task from raw input. Returns `None` for blank text.
    pub fn new(text: &str, due: Option<NaiveDate>) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            id: TaskId::new(),
            text: text.to_string(),
            completed: false,
            due,
            created_at: Utc::now(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text with the trimmed input. Blank input leaves the task
    /// untouched and returns false.
    pub fn set_text(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.text = text.to_string();
        true
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        matches!(self.due, Some(due) if due < today)
    }

    pub fn is_past_due_now(&self) -> bool {
        self.is_past_due(Local::now().date_naive())
    }
}
