use std::convert::TryFrom;

use chrono::{DateTime, Local};
use mockable::Clock;
use thiserror::Error;
use tracing::debug;

/// A single to-do entry. Only `completed` can change after creation,
/// and only from false to true.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    title: String,
    description: String,
    created_at: DateTime<Local>,
    completed: bool,
}

/// The state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Done,
}

/// Errors returned by position-addressed operations on a task list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskListError {
    /// The position is outside `1..=len`.
    #[error("invalid task position {position}, expected a value between 1 and {len}")]
    InvalidPosition { position: i64, len: usize },
}

impl Task {
    fn new(title: String, description: String, created_at: DateTime<Local>) -> Self {
        Task {
            title,
            description,
            created_at,
            completed: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn is_done(&self) -> bool {
        self.completed
    }

    pub fn state(&self) -> TaskState {
        if self.completed {
            TaskState::Done
        } else {
            TaskState::Pending
        }
    }

    /// Mark the task as done. Marking a done task again changes nothing.
    fn mark_completed(&mut self) {
        self.completed = true;
    }
}

/// The tasks of one session, in insertion order. Tasks are addressed
/// by their 1-based position, which shifts when an earlier task is
/// deleted.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList { tasks: Vec::new() }
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

    /// Return the task at the given 1-based position.
    pub fn get(&self, position: i64) -> Result<&Task, TaskListError> {
        let index = self.index_of(position)?;
        Ok(&self.tasks[index])
    }

    /// Append a pending task stamped with the clock's current local time.
    pub fn add(&mut self, title: String, description: String, clock: &impl Clock) -> &Task {
        let task = Task::new(title, description, clock.local());
        debug!(title = %task.title, position = self.tasks.len() + 1, "task added");
        self.tasks.push(task);
        &self.tasks[self.tasks.len() - 1]
    }

    /// Mark the task at the given position as done.
    pub fn complete(&mut self, position: i64) -> Result<&Task, TaskListError> {
        if self.get(position)?.is_done() {
            debug!(position, "task already completed");
            return self.get(position);
        }

        let index = self.index_of(position)?;
        let task = &mut self.tasks[index];
        task.mark_completed();
        debug!(position, title = %task.title, "task completed");
        Ok(&self.tasks[index])
    }

    /// Remove the task at the given position, shifting every later task
    /// one position to the left.
    pub fn delete(&mut self, position: i64) -> Result<Task, TaskListError> {
        let index = self.index_of(position)?;
        let task = self.tasks.remove(index);
        debug!(position, title = %task.title, remaining = self.tasks.len(), "task deleted");
        Ok(task)
    }

    // Map a 1-based position into a vector index.
    fn index_of(&self, position: i64) -> Result<usize, TaskListError> {
        let len = self.tasks.len();
        match usize::try_from(position) {
            Ok(p) if p >= 1 && p <= len => Ok(p - 1),
            _ => Err(TaskListError::InvalidPosition { position, len }),
        }
    }
}
