use std::cell::RefCell;
use std::rc::{
  Rc,
  Weak
};

use tracing::trace;

use crate::board::TaskBoard;
use crate::debounce::{
  Debounced,
  Scheduler,
  debounce
};
use crate::render::ListSurface;

/// Input capture for the three filter
/// controls. Typed text is recorded on
/// the board at once, but the refresh
/// it triggers goes through the
/// debounce; the selectors refresh the
/// board straight away.
pub struct Controls<S, T: Scheduler> {
  board:  Rc<RefCell<TaskBoard<S>>>,
  search: Debounced<(), T>
}

impl<S, T> Controls<S, T>
where
  S: ListSurface + 'static,
  T: Scheduler
{
  pub fn new(
    board: Rc<RefCell<TaskBoard<S>>>,
    scheduler: T
  ) -> Self {
    let delay = board
      .borrow()
      .settings()
      .search_debounce;
    let target: Weak<
      RefCell<TaskBoard<S>>
    > = Rc::downgrade(&board);

    let search = debounce(
      scheduler,
      delay,
      move |()| {
        // The board may be gone if the
        // page was torn down meanwhile.
        if let Some(board) =
          target.upgrade()
        {
          board.borrow_mut().refresh();
        }
      }
    );

    Self {
      board,
      search
    }
  }

  pub fn board(
    &self
  ) -> &Rc<RefCell<TaskBoard<S>>> {
    &self.board
  }

  pub fn on_search_input(
    &self,
    value: &str
  ) {
    trace!(value, "search input");
    self
      .board
      .borrow_mut()
      .set_search_text(value);
    self.search.call(());
  }

  pub fn on_status_change(
    &self,
    value: &str
  ) {
    self
      .board
      .borrow_mut()
      .status_changed(value);
  }

  pub fn on_priority_change(
    &self,
    value: &str
  ) {
    self
      .board
      .borrow_mut()
      .priority_changed(value);
  }

  pub fn search_pending(&self) -> bool {
    self.search.is_pending()
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;
  use crate::config::Settings;
  use crate::debounce::ManualScheduler;
  use crate::render::TaskItem;
  use crate::store::TaskStore;
  use crate::task::{
    Priority,
    Status,
    Task
  };

  fn controls(
    tasks: Vec<Task>
  ) -> (
    Controls<Vec<TaskItem>, ManualScheduler>,
    ManualScheduler
  ) {
    let mut board = TaskBoard::new(
      TaskStore::from_tasks(tasks).unwrap(),
      Settings::default(),
      Vec::<TaskItem>::new()
    );
    board.refresh();

    let clock = ManualScheduler::new();
    let controls = Controls::new(
      Rc::new(RefCell::new(board)),
      clock.clone()
    );
    (controls, clock)
  }

  #[test]
  fn selectors_apply_immediately_search_waits()
   {
    let (controls, clock) = controls(vec![
      Task::new_pending(
        "Buy milk".into(),
        Priority::Low
      ),
      Task::new_pending(
        "Fix bike".into(),
        Priority::High
      ),
    ]);

    controls.on_priority_change("high");
    assert_eq!(
      controls.board().borrow().surface().len(),
      1
    );

    controls.on_priority_change("all");
    controls.on_search_input("m");
    controls.on_search_input("mi");
    assert_eq!(
      controls.board().borrow().surface().len(),
      2
    );
    assert!(controls.search_pending());

    clock.advance(Duration::from_millis(300));
    let board = controls.board().borrow();
    assert_eq!(board.surface().len(), 1);
    assert_eq!(board.surface()[0].title, "Buy milk");
    assert_eq!(board.filters().search, "mi");
  }

  #[test]
  fn selector_change_inside_window_uses_typed_text()
   {
    let mut report = Task::new_pending(
      "Write report".into(),
      Priority::High
    );
    report.status = Status::Completed;
    let (controls, clock) = controls(vec![
      Task::new_pending(
        "Buy milk".into(),
        Priority::Low
      ),
      report,
    ]);

    controls.on_search_input("milk");
    assert_eq!(
      controls.board().borrow().surface().len(),
      2
    );

    controls.on_status_change("pending");
    assert_eq!(
      controls.board().borrow().surface().len(),
      1
    );

    controls.on_status_change("all");
    assert_eq!(
      controls.board().borrow().surface()[0]
        .title,
      "Buy milk"
    );

    clock.run_until_idle();
    assert_eq!(
      controls.board().borrow().surface().len(),
      1
    );
  }
}
