use chrono::NaiveDate;
use tracing::debug;

use crate::model::ordering::{sort_tasks, CompletedPlacement};
use crate::model::task::{Task, TaskId};

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum TaskListError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("position {position} out of range for {len} tasks")]
    OutOfRange { position: usize, len: usize },
    #[error("task text is blank")]
    BlankText,
    #[error("task {0} is completed and cannot be edited")]
    Completed(TaskId),
}

pub type Result<T> = std::result::Result<T, TaskListError>;

/// The ordered in-memory collection of tasks.
///
/// Add, toggle and due-date changes re-derive the order. Edit and delete
/// keep the relative order of the remaining tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    placement: CompletedPlacement,
}

impl TaskList {
    pub fn new(placement: CompletedPlacement) -> Self {
        Self {
            tasks: Vec::new(),
            placement,
        }
    }

    pub fn placement(&self) -> CompletedPlacement {
        self.placement
    }

    pub fn set_placement(&mut self, placement: CompletedPlacement) {
        self.placement = placement;
        self.resort();
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn id_at(&self, position: usize) -> Result<TaskId> {
        self.tasks
            .get(position)
            .map(|t| t.id)
            .ok_or(TaskListError::OutOfRange {
                position,
                len: self.tasks.len(),
            })
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskListError::NotFound(id))
    }

    fn resort(&mut self) {
        sort_tasks(&mut self.tasks, self.placement);
    }

    pub fn add(&mut self, text: &str, due: Option<NaiveDate>) -> Result<TaskId> {
        let task = Task::new(text, due).ok_or(TaskListError::BlankText)?;
        let id = task.id;
        debug!(%id, text = task.text(), ?due, "task added");
        self.tasks.push(task);
        self.resort();
        Ok(id)
    }

    pub fn toggle(&mut self, id: TaskId) -> Result<()> {
        let task = self.get_mut(id)?;
        task.toggle();
        debug!(%id, completed = task.completed, "task toggled");
        self.resort();
        Ok(())
    }

    /// Checks that `id` may enter inline editing and returns its current text.
    pub fn begin_edit(&self, id: TaskId) -> Result<&str> {
        let task = self.get(id).ok_or(TaskListError::NotFound(id))?;
        if task.completed {
            return Err(TaskListError::Completed(id));
        }
        Ok(task.text())
    }

    pub fn commit_edit(&mut self, id: TaskId, text: &str) -> Result<()> {
        let task = self.get_mut(id)?;
        if task.completed {
            return Err(TaskListError::Completed(id));
        }
        if !task.set_text(text) {
            return Err(TaskListError::BlankText);
        }
        debug!(%id, text = task.text(), "task edited");
        Ok(())
    }

    pub fn delete(&mut self, id: TaskId) -> Result<Task> {
        let position = self.position_of(id).ok_or(TaskListError::NotFound(id))?;
        let task = self.tasks.remove(position);
        debug!(%id, position, "task deleted");
        Ok(task)
    }

    pub fn assign_due(&mut self, id: TaskId, date: NaiveDate) -> Result<()> {
        self.get_mut(id)?.due = Some(date);
        debug!(%id, %date, "due date assigned");
        self.resort();
        Ok(())
    }

    pub fn clear_due(&mut self, id: TaskId) -> Result<()> {
        self.get_mut(id)?.due = None;
        debug!(%id, "due date cleared");
        self.resort();
        Ok(())
    }

    // Position-addressed variants. The id is resolved immediately and not kept.

    pub fn toggle_at(&mut self, position: usize) -> Result<()> {
        let id = self.id_at(position)?;
        self.toggle(id)
    }

    pub fn commit_edit_at(&mut self, position: usize, text: &str) -> Result<()> {
        let id = self.id_at(position)?;
        self.commit_edit(id, text)
    }

    pub fn delete_at(&mut self, position: usize) -> Result<Task> {
        let id = self.id_at(position)?;
        self.delete(id)
    }

    pub fn assign_due_at(&mut self, position: usize, date: NaiveDate) -> Result<()> {
        let id = self.id_at(position)?;
        self.assign_due(id, date)
    }

    pub fn past_due(&self, today: NaiveDate) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.is_past_due(today))
    }
}
