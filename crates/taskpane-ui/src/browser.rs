use std::time::Duration;

use gloo::timers::callback::Timeout;
use taskpane_core::Prompter;
use taskpane_core::debounce::Scheduler;
use taskpane_core::render::{
  ListSurface,
  TaskItem
};
use yew::UseStateHandle;

/// `window.confirm` / `window.prompt`.
/// A missing window counts as declined.
pub struct WindowPrompter;

impl Prompter for WindowPrompter {
  fn confirm(&self, message: &str) -> bool {
    web_sys::window()
      .and_then(|window| {
        window
          .confirm_with_message(message)
          .ok()
      })
      .unwrap_or(false)
  }

  fn prompt(
    &self,
    message: &str,
    default: &str
  ) -> Option<String> {
    web_sys::window()
      .and_then(|window| {
        window
          .prompt_with_message_and_default(
            message, default
          )
          .ok()
      })
      .flatten()
  }
}

/// Debounce timers on the browser event
/// loop via `setTimeout`.
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
  type Handle = Timeout;

  fn schedule(
    &self,
    delay: Duration,
    callback: Box<dyn FnOnce()>
  ) -> Timeout {
    let millis =
      u32::try_from(delay.as_millis())
        .unwrap_or(u32::MAX);
    Timeout::new(millis, callback)
  }

  fn cancel(&self, handle: Timeout) {
    drop(handle.cancel());
  }
}

/// List surface backed by component
/// state; replacing the items schedules
/// a re-render.
pub struct StateSurface {
  items: UseStateHandle<Vec<TaskItem>>
}

impl StateSurface {
  pub fn new(
    items: UseStateHandle<Vec<TaskItem>>
  ) -> Self {
    Self {
      items
    }
  }
}

impl ListSurface for StateSurface {
  fn replace_items(
    &mut self,
    items: Vec<TaskItem>
  ) {
    self.items.set(items);
  }
}
