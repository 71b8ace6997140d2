mod filters_panel;
mod task_form_panel;
mod task_list;
mod task_list_row;

pub use filters_panel::FiltersPanel;
pub use task_form_panel::TaskFormPanel;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
