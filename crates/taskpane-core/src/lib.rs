pub mod board;
pub mod config;
pub mod controls;
pub mod debounce;
pub mod filter;
pub mod prompt;
pub mod render;
pub mod store;
pub mod task;

pub use board::TaskBoard;
pub use config::{
  Config,
  Settings
};
pub use controls::Controls;
pub use debounce::{
  Debounced,
  ManualScheduler,
  Scheduler,
  debounce
};
pub use filter::{
  Choice,
  FilterState,
  apply_filters
};
pub use prompt::Prompter;
pub use render::{
  ListSurface,
  Renderer,
  TaskItem
};
pub use store::TaskStore;
pub use task::{
  Priority,
  Status,
  Task,
  TaskForm,
  TaskId
};
