use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

/// Opaque task identifier. Seed data
/// may use any unique string; tasks
/// created here get a UUID v4.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
  pub fn generate() -> Self {
    Self(Uuid::new_v4().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for TaskId {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

impl From<String> for TaskId {
  fn from(value: String) -> Self {
    Self(value)
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Pending,
  Completed
}

impl Status {
  pub fn as_str(self) -> &'static str {
    match self {
      | Status::Pending => "pending",
      | Status::Completed => "completed"
    }
  }

  pub fn toggled(self) -> Self {
    match self {
      | Status::Pending => {
        Status::Completed
      }
      | Status::Completed => {
        Status::Pending
      }
    }
  }
}

impl fmt::Display for Status {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Status {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "pending" => Ok(Status::Pending),
      | "completed" => {
        Ok(Status::Completed)
      }
      | other => Err(anyhow!(
        "unknown status: {other}"
      ))
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High
}

impl Priority {
  pub const ALL: [Priority; 3] = [
    Priority::Low,
    Priority::Medium,
    Priority::High
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | Priority::Low => "low",
      | Priority::Medium => "medium",
      | Priority::High => "high"
    }
  }
}

impl fmt::Display for Priority {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Priority {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "low" => Ok(Priority::Low),
      | "medium" => Ok(Priority::Medium),
      | "high" => Ok(Priority::High),
      | other => Err(anyhow!(
        "unknown priority: {other}"
      ))
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Task {
  pub id:          TaskId,
  pub title:       String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub priority:    Priority,
  #[serde(default, alias = "dueDate")]
  pub due_date:    Option<String>,
  #[serde(default = "default_status")]
  pub status:      Status
}

fn default_status() -> Status {
  Status::Pending
}

impl Task {
  pub fn new_pending(
    title: String,
    priority: Priority
  ) -> Self {
    Self {
      id: TaskId::generate(),
      title,
      description: None,
      priority,
      due_date: None,
      status: Status::Pending
    }
  }

  pub fn description_text(
    &self
  ) -> &str {
    self
      .description
      .as_deref()
      .unwrap_or_default()
  }

  pub fn is_pending(&self) -> bool {
    self.status == Status::Pending
  }
}

/// Field-level update applied by
/// [`crate::store::TaskStore::update`].
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
)]
pub struct TaskPatch {
  pub title:  Option<String>,
  pub status: Option<Status>
}

/// Draft values held by the new-task
/// form until it is submitted.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub struct TaskForm {
  pub title:       String,
  pub description: String,
  pub priority:    Priority,
  pub due_date:    String
}

impl TaskForm {
  pub fn is_blank(&self) -> bool {
    self.title.trim().is_empty()
  }

  /// Builds a pending task from the
  /// draft, leaving the form cleared.
  /// Returns `None` and keeps the draft
  /// when the title is blank.
  pub fn take(
    &mut self
  ) -> Option<Task> {
    if self.is_blank() {
      return None;
    }

    let draft = std::mem::take(self);
    let mut task = Task::new_pending(
      draft.title.trim().to_string(),
      draft.priority
    );
    task.description =
      non_empty(draft.description);
    task.due_date =
      non_empty(draft.due_date);
    Some(task)
  }
}

fn non_empty(
  value: String
) -> Option<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_string())
  }
}
