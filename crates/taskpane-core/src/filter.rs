use std::str::FromStr;

use tracing::trace;

use crate::task::{
  Priority,
  Status,
  Task
};

/// Value of a discrete-choice control.
/// `Unrecognized` keeps a value that
/// names no known level; it matches no
/// task, the same way an exact string
/// comparison against it would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
  All,
  Is(T),
  Unrecognized(String)
}

impl<T> Default for Choice<T> {
  fn default() -> Self {
    Choice::All
  }
}

impl<T> Choice<T>
where
  T: FromStr + PartialEq
{
  /// Reads a raw control value. Empty
  /// and `all` (any case) select
  /// everything.
  pub fn from_control(
    raw: &str
  ) -> Self {
    let value =
      raw.trim().to_ascii_lowercase();
    if value.is_empty() || value == "all"
    {
      return Choice::All;
    }

    match value.parse::<T>() {
      | Ok(parsed) => Choice::Is(parsed),
      | Err(_) => {
        Choice::Unrecognized(value)
      }
    }
  }

  pub fn admits(
    &self,
    value: &T
  ) -> bool {
    match self {
      | Choice::All => true,
      | Choice::Is(expected) => {
        expected == value
      }
      | Choice::Unrecognized(_) => false
    }
  }
}

/// The three active filter values, read
/// fresh from the controls on every
/// pipeline run.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct FilterState {
  pub search:   String,
  pub status:   Choice<Status>,
  pub priority: Choice<Priority>
}

impl FilterState {
  pub fn from_controls(
    search: &str,
    status: &str,
    priority: &str
  ) -> Self {
    Self {
      search:   search.to_string(),
      status:   Choice::from_control(
        status
      ),
      priority: Choice::from_control(
        priority
      )
    }
  }

  pub fn apply(
    &self,
    tasks: &[Task]
  ) -> Vec<Task> {
    apply_filters(
      tasks,
      &self.search,
      &self.status,
      &self.priority
    )
  }
}

/// Normalized search term: trimmed and
/// lower-cased.
pub fn normalize_search(
  term: &str
) -> String {
  term.trim().to_lowercase()
}

pub fn matches_search(
  task: &Task,
  needle: &str
) -> bool {
  if needle.is_empty() {
    return true;
  }

  task
    .title
    .to_lowercase()
    .contains(needle)
    || task
      .description_text()
      .to_lowercase()
      .contains(needle)
}

/// Derives the visible subset. The
/// input slice is never modified; the
/// result is a fresh copy in input
/// order.
pub fn apply_filters(
  tasks: &[Task],
  search_term: &str,
  status_filter: &Choice<Status>,
  priority_filter: &Choice<Priority>
) -> Vec<Task> {
  let needle =
    normalize_search(search_term);

  let filtered: Vec<Task> = tasks
    .iter()
    .filter(|task| {
      matches_search(task, &needle)
    })
    .filter(|task| {
      status_filter.admits(&task.status)
    })
    .filter(|task| {
      priority_filter
        .admits(&task.priority)
    })
    .cloned()
    .collect();

  trace!(
    total = tasks.len(),
    visible = filtered.len(),
    search = %needle,
    "applied filters"
  );
  filtered
}
