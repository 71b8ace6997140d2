use taskpane_core::render::{
  ItemAction,
  TaskItem
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub items:     Vec<TaskItem>,
  pub total:     usize,
  pub on_action: Callback<ItemAction>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <div class="panel list">
          <div class="header">
              { format!("Tasks ({} of {})", props.items.len(), props.total) }
          </div>
          <ul id="taskList">
              {
                  for props.items.iter().cloned().map(|item| html! {
                      <TaskListRow
                          key={item.id.to_string()}
                          item={item.clone()}
                          on_action={props.on_action.clone()}
                      />
                  })
              }
          </ul>
      </div>
  }
}
