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

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub item:      TaskItem,
  pub on_action: Callback<ItemAction>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let item = &props.item;

  html! {
      <li class={item.classes()} data-id={item.id.to_string()}>
          <div class="task-details">
              <strong>{ &item.title }</strong>
              <p>{ &item.description }</p>
              <span class={item.priority_class.clone()}>{ &item.priority_label }</span>
              { " | " }
              <span>{ &item.due_label }</span>
              { " | " }
              <span>{ &item.status_label }</span>
          </div>
          <div class="task-actions">
              {
                  for item.actions.iter().cloned().map(|action| {
                      let on_action = props.on_action.clone();
                      let label = action.label.clone();
                      html! {
                          <button
                              type="button"
                              onclick={move |_| on_action.emit(action.clone())}
                          >
                              { label }
                          </button>
                      }
                  })
              }
          </div>
      </li>
  }
}
