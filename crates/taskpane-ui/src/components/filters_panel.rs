use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FiltersPanelProps {
  pub search_value:       String,
  pub on_search_input:
    Callback<web_sys::InputEvent>,
  pub status_value:       String,
  pub on_status_change:
    Callback<web_sys::Event>,
  pub priority_value:     String,
  pub on_priority_change:
    Callback<web_sys::Event>
}

#[function_component(FiltersPanel)]
pub fn filters_panel(
  props: &FiltersPanelProps
) -> Html {
  html! {
      <div class="panel">
          <div class="header">{ "Task Filters" }</div>
          <div class="details">
              <div class="field">
                  <label>{ "Search Tasks" }</label>
                  <input
                      id="searchInput"
                      value={props.search_value.clone()}
                      placeholder="Search tasks"
                      oninput={props.on_search_input.clone()}
                  />
              </div>
              <div class="field">
                  <label>{ "Status" }</label>
                  <select
                      id="statusFilter"
                      value={props.status_value.clone()}
                      onchange={props.on_status_change.clone()}
                  >
                      <option value="all">{ "All" }</option>
                      <option value="pending">{ "Pending" }</option>
                      <option value="completed">{ "Completed" }</option>
                  </select>
              </div>
              <div class="field">
                  <label>{ "Priority" }</label>
                  <select
                      id="priorityFilter"
                      value={props.priority_value.clone()}
                      onchange={props.on_priority_change.clone()}
                  >
                      <option value="all">{ "All Priorities" }</option>
                      <option value="low">{ "Low" }</option>
                      <option value="medium">{ "Medium" }</option>
                      <option value="high">{ "High" }</option>
                  </select>
              </div>
          </div>
      </div>
  }
}
