use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use taskpane_core::filter::{
  Choice,
  apply_filters
};
use taskpane_core::prompt::{
  Answer,
  ScriptedPrompter
};
use taskpane_core::render::{
  MarkupSurface,
  TaskItem
};
use taskpane_core::{
  Controls,
  ManualScheduler,
  Settings,
  Status,
  TaskBoard,
  TaskId,
  TaskStore
};

const SEED: &str = r#"[
  {
    "id": "1",
    "title": "Buy milk",
    "status": "pending",
    "priority": "low"
  },
  {
    "id": "2",
    "title": "Write report",
    "description": "Quarterly numbers",
    "status": "completed",
    "priority": "high",
    "dueDate": "2026-01-31"
  }
]"#;

fn seeded_board<S>(
  surface: S
) -> TaskBoard<S>
where
  S: taskpane_core::ListSurface
{
  let store = TaskStore::from_json(SEED)
    .expect("seed parses");
  let mut board = TaskBoard::new(
    store,
    Settings::default(),
    surface
  );
  board.refresh();
  board
}

fn titles(items: &[TaskItem]) -> Vec<&str> {
  items
    .iter()
    .map(|item| item.title.as_str())
    .collect()
}

#[test]
fn search_milk_keeps_only_first_task() {
  let store = TaskStore::from_json(SEED)
    .expect("seed parses");
  let result = apply_filters(
    store.list(),
    "milk",
    &Choice::All,
    &Choice::All
  );

  assert_eq!(result.len(), 1);
  assert_eq!(result[0].title, "Buy milk");
}

#[test]
fn completed_status_filter_keeps_only_second_task()
 {
  let mut board = seeded_board(Vec::<TaskItem>::new());
  board.status_changed("completed");
  board.priority_changed("all");
  board.search_changed("");

  assert_eq!(
    titles(board.surface()),
    vec!["Write report"]
  );
}

#[test]
fn delete_accepted_and_declined() {
  let mut board = seeded_board(Vec::<TaskItem>::new());
  let first = TaskId::from("1");

  let decline = ScriptedPrompter::new([
    Answer::Confirm(false)
  ]);
  assert!(!board.delete(&first, &decline));
  assert_eq!(board.store().len(), 2);

  let accept = ScriptedPrompter::new([
    Answer::Confirm(true)
  ]);
  assert!(board.delete(&first, &accept));
  let remaining: Vec<&str> = board
    .store()
    .list()
    .iter()
    .map(|t| t.title.as_str())
    .collect();
  assert_eq!(remaining, vec!["Write report"]);
  assert_eq!(
    titles(board.surface()),
    vec!["Write report"]
  );
}

#[test]
fn toggle_twice_restores_status() {
  let mut board = seeded_board(Vec::<TaskItem>::new());
  let report = TaskId::from("2");

  board.toggle_complete(&report);
  assert_eq!(
    board.store().get(&report).map(|t| t.status),
    Some(Status::Pending)
  );
  board.toggle_complete(&report);
  assert_eq!(
    board.store().get(&report).map(|t| t.status),
    Some(Status::Completed)
  );
}

#[test]
fn markup_carries_ids_classes_and_placeholders()
 {
  let board =
    seeded_board(MarkupSurface::new());
  let html = board.surface().as_str();

  assert!(html.contains(
    "<li class=\"task-item pending\" \
     data-id=\"1\">"
  ));
  assert!(html.contains("<p>No description</p>"));
  assert!(html.contains("Due: N/A"));
  assert!(html.contains("Due: 2026-01-31"));
  assert!(html.contains(
    "<span class=\"badge-high\">Priority: high</span>"
  ));
  assert!(html.contains(">Mark Pending</button>"));

  let pending_at = html
    .find("Buy milk")
    .expect("pending rendered");
  let completed_at = html
    .find("Write report")
    .expect("completed rendered");
  assert!(pending_at < completed_at);
}

#[test]
fn debounced_search_fires_once_after_quiet_period()
 {
  let clock = ManualScheduler::new();
  let board = Rc::new(RefCell::new(
    seeded_board(Vec::<TaskItem>::new())
  ));
  let controls =
    Controls::new(Rc::clone(&board), clock.clone());

  controls.on_search_input("r");
  clock.advance(Duration::from_millis(50));
  controls.on_search_input("re");
  clock.advance(Duration::from_millis(50));
  controls.on_search_input("report");

  clock.advance(Duration::from_millis(299));
  assert_eq!(board.borrow().surface().len(), 2);
  assert_eq!(clock.pending(), 1);

  clock.advance(Duration::from_millis(1));
  assert_eq!(clock.now(), Duration::from_millis(400));
  assert_eq!(
    titles(board.borrow().surface()),
    vec!["Write report"]
  );
}

#[test]
fn typed_search_applies_to_immediate_selector_change()
 {
  let clock = ManualScheduler::new();
  let board = Rc::new(RefCell::new(
    seeded_board(Vec::<TaskItem>::new())
  ));
  let controls =
    Controls::new(Rc::clone(&board), clock.clone());

  controls.on_search_input("milk");
  controls.on_status_change("pending");
  assert_eq!(
    titles(board.borrow().surface()),
    vec!["Buy milk"]
  );
}
