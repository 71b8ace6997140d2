use taskpane_core::{
  Priority,
  TaskForm
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskFormPanelProps {
  pub form:      TaskForm,
  pub on_change: Callback<TaskForm>,
  pub on_submit:
    Callback<web_sys::SubmitEvent>
}

#[function_component(TaskFormPanel)]
pub fn task_form_panel(
  props: &TaskFormPanelProps
) -> Html {
  let edit =
    |apply: fn(&mut TaskForm, String)| {
      let form = props.form.clone();
      let on_change =
        props.on_change.clone();
      Callback::from(
        move |e: web_sys::InputEvent| {
          let input: web_sys::HtmlInputElement =
            e.target_unchecked_into();
          let mut next = form.clone();
          apply(&mut next, input.value());
          on_change.emit(next);
        }
      )
    };

  let on_priority_change = {
    let form = props.form.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let Some(select) = e
          .target_dyn_into::<
            web_sys::HtmlSelectElement
          >()
        else {
          tracing::warn!(
            "priority change event had \
             non-select target"
          );
          return;
        };
        let Ok(priority) = select
          .value()
          .parse::<Priority>()
        else {
          return;
        };
        let mut next = form.clone();
        next.priority = priority;
        on_change.emit(next);
      }
    )
  };

  html! {
      <form id="taskForm" class="panel" onsubmit={props.on_submit.clone()}>
          <div class="header">{ "New Task" }</div>
          <div class="details">
              <div class="field">
                  <label>{ "Title" }</label>
                  <input
                      value={props.form.title.clone()}
                      required=true
                      oninput={edit(|form, value| form.title = value)}
                  />
              </div>
              <div class="field">
                  <label>{ "Description" }</label>
                  <input
                      value={props.form.description.clone()}
                      oninput={edit(|form, value| form.description = value)}
                  />
              </div>
              <div class="field">
                  <label>{ "Priority" }</label>
                  <select
                      value={props.form.priority.as_str()}
                      onchange={on_priority_change}
                  >
                      {
                          for Priority::ALL.iter().map(|priority| html! {
                              <option
                                  value={priority.as_str()}
                                  selected={*priority == props.form.priority}
                              >
                                  { priority.as_str() }
                              </option>
                          })
                      }
                  </select>
              </div>
              <div class="field">
                  <label>{ "Due" }</label>
                  <input
                      type="date"
                      value={props.form.due_date.clone()}
                      oninput={edit(|form, value| form.due_date = value)}
                  />
              </div>
              <div class="actions">
                  <button class="btn" type="submit">{ "Add Task" }</button>
              </div>
          </div>
      </form>
  }
}
