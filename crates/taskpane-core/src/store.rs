use std::collections::HashSet;

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info
};

use crate::task::{
  Task,
  TaskId,
  TaskPatch
};

/// Owns the task collection. Order is
/// insertion order; ids are unique.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
  tasks: Vec<Task>
}

impl TaskStore {
  pub fn new() -> Self {
    Self::default()
  }

  #[tracing::instrument(skip(tasks))]
  pub fn from_tasks(
    tasks: Vec<Task>
  ) -> anyhow::Result<Self> {
    let mut seen = HashSet::new();
    for task in &tasks {
      if !seen.insert(&task.id) {
        return Err(anyhow!(
          "duplicate task id {}",
          task.id
        ));
      }
      if task.title.trim().is_empty() {
        return Err(anyhow!(
          "task {} has an empty title",
          task.id
        ));
      }
    }

    info!(
      count = tasks.len(),
      "loaded task collection"
    );
    Ok(Self {
      tasks
    })
  }

  /// Parses a JSON array of tasks.
  pub fn from_json(
    text: &str
  ) -> anyhow::Result<Self> {
    let tasks: Vec<Task> =
      serde_json::from_str(text)
        .context(
          "failed to parse task list \
           JSON"
        )?;
    Self::from_tasks(tasks)
  }

  pub fn list(&self) -> &[Task] {
    &self.tasks
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn get(
    &self,
    id: &TaskId
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| &task.id == id)
  }

  /// Appends a task. A task whose id is
  /// already present is rejected so the
  /// uniqueness invariant holds.
  #[tracing::instrument(skip(self, task), fields(id = %task.id))]
  pub fn create(
    &mut self,
    task: Task
  ) -> anyhow::Result<TaskId> {
    if self.get(&task.id).is_some() {
      return Err(anyhow!(
        "task {} already exists",
        task.id
      ));
    }

    let id = task.id.clone();
    debug!(title = %task.title, "appending task");
    self.tasks.push(task);
    Ok(id)
  }

  /// Applies a patch in place. Returns
  /// `false` when no task has `id`.
  #[tracing::instrument(skip(self, patch))]
  pub fn update(
    &mut self,
    id: &TaskId,
    patch: TaskPatch
  ) -> bool {
    let Some(task) = self
      .tasks
      .iter_mut()
      .find(|task| &task.id == id)
    else {
      debug!("update target not found");
      return false;
    };

    if let Some(title) = patch.title {
      task.title = title;
    }
    if let Some(status) = patch.status
    {
      task.status = status;
    }
    true
  }

  /// Removes the task with `id`,
  /// keeping the order of the rest.
  #[tracing::instrument(skip(self))]
  pub fn remove(
    &mut self,
    id: &TaskId
  ) -> Option<Task> {
    let idx = self
      .tasks
      .iter()
      .position(|task| &task.id == id)?;
    Some(self.tasks.remove(idx))
  }
}
