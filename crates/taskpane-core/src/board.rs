use tracing::{
  debug,
  info,
  warn
};

use crate::config::Settings;
use crate::filter::{
  Choice,
  FilterState
};
use crate::prompt::Prompter;
use crate::render::{
  ActionKind,
  ItemAction,
  ListSurface,
  Renderer
};
use crate::store::TaskStore;
use crate::task::{
  TaskForm,
  TaskId,
  TaskPatch
};

/// Store, active filters and renderer
/// bound to one list surface. Every
/// state change ends in [`refresh`],
/// so the surface always shows the
/// filtered view.
///
/// [`refresh`]: TaskBoard::refresh
#[derive(Debug)]
pub struct TaskBoard<S> {
  store:    TaskStore,
  filters:  FilterState,
  renderer: Renderer,
  settings: Settings,
  surface:  S
}

impl<S: ListSurface> TaskBoard<S> {
  pub fn new(
    store: TaskStore,
    settings: Settings,
    surface: S
  ) -> Self {
    Self {
      store,
      filters: FilterState::default(),
      renderer: Renderer::new(&settings),
      settings,
      surface
    }
  }

  pub fn store(&self) -> &TaskStore {
    &self.store
  }

  pub fn filters(&self) -> &FilterState {
    &self.filters
  }

  pub fn settings(&self) -> &Settings {
    &self.settings
  }

  pub fn surface(&self) -> &S {
    &self.surface
  }

  pub fn surface_mut(&mut self) -> &mut S {
    &mut self.surface
  }

  /// Filter then render. Returns the
  /// number of visible tasks.
  #[tracing::instrument(skip(self))]
  pub fn refresh(&mut self) -> usize {
    let visible =
      self.filters.apply(self.store.list());
    debug!(
      total = self.store.len(),
      visible = visible.len(),
      "pipeline run"
    );
    self
      .renderer
      .render(&visible, &mut self.surface);
    visible.len()
  }

  /// Replaces all three filter values at
  /// once and refreshes.
  pub fn set_filters(
    &mut self,
    filters: FilterState
  ) -> usize {
    self.filters = filters;
    self.refresh()
  }

  pub fn search_changed(
    &mut self,
    term: &str
  ) -> usize {
    self.set_search_text(term);
    self.refresh()
  }

  /// Records the live search text
  /// without re-rendering. The next
  /// pipeline run, whatever triggers it,
  /// filters by this text.
  pub fn set_search_text(
    &mut self,
    term: &str
  ) {
    if self.filters.search != term {
      self.filters.search = term.to_string();
    }
  }

  pub fn status_changed(
    &mut self,
    raw: &str
  ) -> usize {
    self.filters.status =
      Choice::from_control(raw);
    self.refresh()
  }

  pub fn priority_changed(
    &mut self,
    raw: &str
  ) -> usize {
    self.filters.priority =
      Choice::from_control(raw);
    self.refresh()
  }

  /// Flips pending/completed. Unknown
  /// ids are ignored.
  #[tracing::instrument(skip(self))]
  pub fn toggle_complete(
    &mut self,
    id: &TaskId
  ) -> bool {
    let Some(task) = self.store.get(id)
    else {
      debug!("toggle target not found");
      return false;
    };

    let status = task.status.toggled();
    self.store.update(
      id,
      TaskPatch {
        status: Some(status),
        ..TaskPatch::default()
      }
    );
    info!(%status, "toggled task status");
    self.refresh();
    true
  }

  /// Removes the task after the user
  /// confirms. Returns whether a task
  /// was removed.
  #[tracing::instrument(skip(self, prompter))]
  pub fn delete(
    &mut self,
    id: &TaskId,
    prompter: &dyn Prompter
  ) -> bool {
    if !prompter
      .confirm(&self.settings.delete_confirmation)
    {
      debug!("delete declined");
      return false;
    }

    let removed = self.store.remove(id);
    match &removed {
      | Some(task) => {
        info!(title = %task.title, "deleted task");
      }
      | None => {
        debug!("delete target not found");
      }
    }
    self.refresh();
    removed.is_some()
  }

  /// Asks for a new title. Cancelled or
  /// blank answers leave the task as it
  /// was.
  #[tracing::instrument(skip(self, prompter))]
  pub fn edit_inline(
    &mut self,
    id: &TaskId,
    prompter: &dyn Prompter
  ) -> bool {
    let Some(task) = self.store.get(id)
    else {
      debug!("edit target not found");
      return false;
    };

    let answer = prompter.prompt(
      &self.settings.edit_prompt,
      &task.title
    );
    let Some(title) = answer
      .as_deref()
      .map(str::trim)
      .filter(|title| !title.is_empty())
    else {
      debug!("edit cancelled");
      return false;
    };

    self.store.update(
      id,
      TaskPatch {
        title: Some(title.to_string()),
        ..TaskPatch::default()
      }
    );
    info!(%title, "renamed task");
    self.refresh();
    true
  }

  /// Appends a task built from the form,
  /// refreshes, then leaves the form
  /// cleared. A blank title submits
  /// nothing and keeps the draft.
  #[tracing::instrument(skip_all)]
  pub fn submit(
    &mut self,
    form: &mut TaskForm
  ) -> Option<TaskId> {
    let Some(task) = form.take() else {
      debug!(
        "ignoring form submission \
         without a title"
      );
      return None;
    };

    match self.store.create(task) {
      | Ok(id) => {
        info!(%id, "created task");
        self.refresh();
        Some(id)
      }
      | Err(err) => {
        warn!(error = %err, "failed to create task");
        None
      }
    }
  }

  /// Routes a rendered action control to
  /// the matching mutation.
  pub fn dispatch(
    &mut self,
    action: &ItemAction,
    prompter: &dyn Prompter
  ) -> bool {
    match action.kind {
      | ActionKind::Toggle => {
        self.toggle_complete(&action.id)
      }
      | ActionKind::Edit => {
        self.edit_inline(&action.id, prompter)
      }
      | ActionKind::Delete => {
        self.delete(&action.id, prompter)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::prompt::{
    Answer,
    ScriptedPrompter
  };
  use crate::render::TaskItem;
  use crate::task::{
    Priority,
    Status,
    Task
  };

  fn board() -> TaskBoard<Vec<TaskItem>> {
    let mut milk = Task::new_pending(
      "Buy milk".to_string(),
      Priority::Low
    );
    milk.description =
      Some("2 litres".to_string());
    let mut report = Task::new_pending(
      "Write report".to_string(),
      Priority::High
    );
    report.status = Status::Completed;

    let store =
      TaskStore::from_tasks(vec![
        milk, report,
      ])
      .unwrap();
    let mut board = TaskBoard::new(
      store,
      Settings::default(),
      Vec::new()
    );
    board.refresh();
    board
  }

  fn id_of(
    board: &TaskBoard<Vec<TaskItem>>,
    title: &str
  ) -> TaskId {
    board
      .store()
      .list()
      .iter()
      .find(|t| t.title == title)
      .map(|t| t.id.clone())
      .unwrap()
  }

  #[test]
  fn toggle_keeps_filters_applied() {
    let mut board = board();
    board.status_changed("pending");
    assert_eq!(board.surface().len(), 1);

    let milk = id_of(&board, "Buy milk");
    assert!(board.toggle_complete(&milk));
    assert!(board.surface().is_empty());

    assert!(board.toggle_complete(&milk));
    assert_eq!(
      board.store().get(&milk).map(|t| t.status),
      Some(Status::Pending)
    );
    assert_eq!(board.surface().len(), 1);
    assert!(
      !board.toggle_complete(&TaskId::from("missing"))
    );
  }

  #[test]
  fn edit_trims_and_ignores_blank_answers()
   {
    let mut board = board();
    let milk = id_of(&board, "Buy milk");
    let prompter = ScriptedPrompter::new([
      Answer::Text(Some("   ".into())),
      Answer::Text(None),
      Answer::Text(Some(
        "  Buy oat milk ".into()
      )),
    ]);

    assert!(!board.edit_inline(&milk, &prompter));
    assert!(!board.edit_inline(&milk, &prompter));
    assert!(board.edit_inline(&milk, &prompter));
    assert_eq!(
      board.surface()[0].title,
      "Buy oat milk"
    );
    assert_eq!(
      prompter.asked()[0],
      "Enter new title: [Buy milk]"
    );
  }

  #[test]
  fn edit_of_unknown_id_never_prompts() {
    let mut board = board();
    let prompter = ScriptedPrompter::default();
    assert!(
      !board.edit_inline(&TaskId::from("missing"), &prompter)
    );
    assert!(prompter.asked().is_empty());
  }

  #[test]
  fn submit_appends_refreshes_and_clears_form()
   {
    let mut board = board();
    board.search_changed("groceries");
    assert!(board.surface().is_empty());

    let mut form = TaskForm {
      title: "Plan groceries".into(),
      priority: Priority::High,
      ..TaskForm::default()
    };
    let id = board.submit(&mut form);

    assert!(id.is_some());
    assert_eq!(form, TaskForm::default());
    assert_eq!(board.store().len(), 3);
    assert_eq!(board.surface().len(), 1);
    assert_eq!(
      board.surface()[0].priority_class,
      "badge-high"
    );

    assert!(board.submit(&mut form).is_none());
    assert_eq!(board.store().len(), 3);
  }

  #[test]
  fn dispatch_routes_rendered_actions() {
    let mut board = board();
    let prompter = ScriptedPrompter::new([
      Answer::Confirm(true)
    ]);

    let delete = board.surface()[1]
      .action(ActionKind::Delete)
      .cloned()
      .unwrap();
    assert!(board.dispatch(&delete, &prompter));
    assert_eq!(board.store().len(), 1);
    assert_eq!(
      prompter.asked(),
      vec![
        "Are you sure you want to \
         delete this task?"
      ]
    );
  }

  #[test]
  fn confirmed_delete_of_unknown_id_refreshes_and_keeps_store()
   {
    let mut board = board();
    board.surface_mut().clear();
    let prompter = ScriptedPrompter::new([
      Answer::Confirm(true)
    ]);

    assert!(
      !board.delete(&TaskId::from("missing"), &prompter)
    );
    assert_eq!(prompter.asked().len(), 1);
    assert_eq!(board.store().len(), 2);
    assert_eq!(board.surface().len(), 2);
  }

  #[test]
  fn edit_and_delete_keep_filters_applied()
   {
    let mut board = board();
    board.search_changed("milk");
    assert_eq!(board.surface().len(), 1);

    let milk = id_of(&board, "Buy milk");
    let report = id_of(&board, "Write report");
    let prompter = ScriptedPrompter::new([
      Answer::Text(Some("Buy bread".into())),
      Answer::Confirm(true),
    ]);

    assert!(board.edit_inline(&milk, &prompter));
    assert!(board.surface().is_empty());
    assert_eq!(
      board.store().get(&milk).map(|t| t.title.as_str()),
      Some("Buy bread")
    );

    board.search_changed("");
    board.status_changed("pending");
    assert_eq!(board.surface().len(), 1);
    assert!(board.delete(&report, &prompter));
    assert_eq!(board.store().len(), 1);
    assert_eq!(
      board
        .surface()
        .iter()
        .map(|item| item.title.as_str())
        .collect::<Vec<_>>(),
      vec!["Buy bread"]
    );
  }
}
