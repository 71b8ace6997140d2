use std::fmt::Write as _;

use tracing::debug;

use crate::config::Settings;
use crate::task::{
  Priority,
  Status,
  Task,
  TaskId
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ActionKind {
  Toggle,
  Edit,
  Delete
}

/// An action control bound to the id of
/// the item that renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAction {
  pub kind:  ActionKind,
  pub id:    TaskId,
  pub label: String
}

/// One rendered list item. `due` and
/// `description` already carry their
/// placeholders; the `*_label` fields
/// are the display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
  pub id:             TaskId,
  pub status:         Status,
  pub priority:       Priority,
  pub title:          String,
  pub description:    String,
  pub due:            String,
  pub priority_class: String,
  pub priority_label: String,
  pub due_label:      String,
  pub status_label:   String,
  pub actions:        Vec<ItemAction>
}

impl TaskItem {
  pub fn classes(&self) -> String {
    format!(
      "task-item {}",
      self.status
    )
  }

  pub fn action(
    &self,
    kind: ActionKind
  ) -> Option<&ItemAction> {
    self
      .actions
      .iter()
      .find(|action| action.kind == kind)
  }
}

/// Destination of a render pass. Each
/// call replaces everything shown
/// before.
pub trait ListSurface {
  fn replace_items(
    &mut self,
    items: Vec<TaskItem>
  );
}

impl ListSurface for Vec<TaskItem> {
  fn replace_items(
    &mut self,
    items: Vec<TaskItem>
  ) {
    *self = items;
  }
}

#[derive(Debug, Clone)]
pub struct Renderer {
  description_placeholder: String,
  due_placeholder:         String
}

impl Default for Renderer {
  fn default() -> Self {
    Self::new(&Settings::default())
  }
}

impl Renderer {
  pub fn new(settings: &Settings) -> Self {
    Self {
      description_placeholder: settings
        .description_placeholder
        .clone(),
      due_placeholder:         settings
        .due_placeholder
        .clone()
    }
  }

  /// Orders and materializes the
  /// filtered tasks, then replaces the
  /// surface contents.
  #[tracing::instrument(skip_all, fields(count = tasks.len()))]
  pub fn render<S>(
    &self,
    tasks: &[Task],
    surface: &mut S
  ) where
    S: ListSurface + ?Sized
  {
    let items: Vec<TaskItem> =
      order_for_display(tasks)
        .into_iter()
        .map(|task| self.item(task))
        .collect();
    debug!(
      items = items.len(),
      "replacing rendered list"
    );
    surface.replace_items(items);
  }

  pub fn item(
    &self,
    task: &Task
  ) -> TaskItem {
    let description = placeholder(
      task.description.as_deref(),
      &self.description_placeholder
    );
    let due = placeholder(
      task.due_date.as_deref(),
      &self.due_placeholder
    );
    let toggle_label = match task.status
    {
      | Status::Pending => {
        "Mark Complete"
      }
      | Status::Completed => {
        "Mark Pending"
      }
    };

    let bind = |kind, label: &str| {
      ItemAction {
        kind,
        id: task.id.clone(),
        label: label.to_string()
      }
    };

    TaskItem {
      id: task.id.clone(),
      status: task.status,
      priority: task.priority,
      title: task.title.clone(),
      description,
      priority_class: format!(
        "badge-{}",
        task.priority
      ),
      priority_label: format!(
        "Priority: {}",
        task.priority
      ),
      due_label: format!("Due: {due}"),
      due,
      status_label: format!(
        "Status: {}",
        task.status
      ),
      actions: vec![
        bind(
          ActionKind::Toggle,
          toggle_label
        ),
        bind(ActionKind::Edit, "Edit"),
        bind(
          ActionKind::Delete,
          "Delete"
        ),
      ]
    }
  }
}

/// Pending tasks first, then completed
/// ones; each group keeps the input
/// order.
pub fn order_for_display(
  tasks: &[Task]
) -> Vec<&Task> {
  let (pending, completed): (
    Vec<&Task>,
    Vec<&Task>
  ) = tasks
    .iter()
    .partition(|task| task.is_pending());
  pending
    .into_iter()
    .chain(completed)
    .collect()
}

fn placeholder(
  value: Option<&str>,
  fallback: &str
) -> String {
  match value {
    | Some(text) if !text.is_empty() => {
      text.to_string()
    }
    | _ => fallback.to_string()
  }
}

/// Renders items as escaped `<li>`
/// markup, one element per item.
#[derive(Debug, Clone, Default)]
pub struct MarkupSurface {
  html: String
}

impl MarkupSurface {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn as_str(&self) -> &str {
    &self.html
  }
}

impl ListSurface for MarkupSurface {
  fn replace_items(
    &mut self,
    items: Vec<TaskItem>
  ) {
    self.html.clear();
    for item in &items {
      write_item(&mut self.html, item);
    }
  }
}

fn write_item(
  out: &mut String,
  item: &TaskItem
) {
  // Writing into a String cannot fail.
  let _ = write!(
    out,
    "<li class=\"{}\" data-id=\"{}\">\
     <div class=\"task-details\">\
     <strong>{}</strong>\
     <p>{}</p>\
     <span class=\"{}\">{}</span> | \
     <span>{}</span> | \
     <span>{}</span>\
     </div>\
     <div class=\"task-actions\">",
    escape(&item.classes()),
    escape(item.id.as_str()),
    escape(&item.title),
    escape(&item.description),
    escape(&item.priority_class),
    escape(&item.priority_label),
    escape(&item.due_label),
    escape(&item.status_label)
  );
  for action in &item.actions {
    let _ = write!(
      out,
      "<button data-action=\"{}\" \
       data-id=\"{}\">{}</button>",
      action_name(action.kind),
      escape(action.id.as_str()),
      escape(&action.label)
    );
  }
  out.push_str("</div></li>\n");
}

fn action_name(
  kind: ActionKind
) -> &'static str {
  match kind {
    | ActionKind::Toggle => "toggle",
    | ActionKind::Edit => "edit",
    | ActionKind::Delete => "delete"
  }
}

pub fn escape(text: &str) -> String {
  let mut out =
    String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      | '&' => out.push_str("&amp;"),
      | '<' => out.push_str("&lt;"),
      | '>' => out.push_str("&gt;"),
      | '"' => out.push_str("&quot;"),
      | '\'' => out.push_str("&#39;"),
      | _ => out.push(ch)
    }
  }
  out
}
