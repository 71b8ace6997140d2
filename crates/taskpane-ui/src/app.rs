use std::cell::RefCell;
use std::rc::Rc;

use gloo::console::log;
use taskpane_core::render::{
  ItemAction,
  TaskItem
};
use taskpane_core::{
  Controls,
  Settings,
  TaskBoard,
  TaskForm,
  TaskStore
};
use yew::{
  Callback,
  Html,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_state
};

use crate::browser::{
  StateSurface,
  TimeoutScheduler,
  WindowPrompter
};
use crate::components::{
  FiltersPanel,
  TaskFormPanel,
  TaskList
};

type BoardControls =
  Controls<StateSurface, TimeoutScheduler>;

const SEED_TASKS: &str =
  include_str!("../assets/seed.json");

fn seed_store() -> TaskStore {
  match TaskStore::from_json(SEED_TASKS) {
    | Ok(store) => store,
    | Err(err) => {
      tracing::error!(
        error = %format!("{err:#}"),
        "failed to load seed tasks; \
         starting empty"
      );
      TaskStore::new()
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let items = use_state(Vec::<TaskItem>::new);
  let form = use_state(TaskForm::default);
  let search = use_state(String::new);
  let status = use_state(|| "all".to_string());
  let priority =
    use_state(|| "all".to_string());

  let controls = {
    let items = items.clone();
    use_memo((), move |_| {
      let board = TaskBoard::new(
        seed_store(),
        Settings::default(),
        StateSurface::new(items)
      );
      BoardControls::new(
        Rc::new(RefCell::new(board)),
        TimeoutScheduler
      )
    })
  };

  {
    let controls = controls.clone();
    use_effect_with((), move |_| {
      let visible = controls
        .board()
        .borrow_mut()
        .refresh();
      tracing::info!(
        visible,
        "initial render"
      );
    });
  }

  let on_search_input = {
    let controls = controls.clone();
    let search = search.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        let value = input.value();
        controls.on_search_input(&value);
        search.set(value);
      }
    )
  };

  let on_status_change = {
    let controls = controls.clone();
    let status = status.clone();
    Callback::from(
      move |e: web_sys::Event| {
        if let Some(select) =
          e.target_dyn_into::<
            web_sys::HtmlSelectElement
          >()
        {
          let value = select.value();
          controls.on_status_change(&value);
          status.set(value);
        } else {
          tracing::warn!(
            "status filter event had \
             non-select target"
          );
        }
      }
    )
  };

  let on_priority_change = {
    let controls = controls.clone();
    let priority = priority.clone();
    Callback::from(
      move |e: web_sys::Event| {
        if let Some(select) =
          e.target_dyn_into::<
            web_sys::HtmlSelectElement
          >()
        {
          let value = select.value();
          controls
            .on_priority_change(&value);
          priority.set(value);
        } else {
          tracing::warn!(
            "priority filter event had \
             non-select target"
          );
        }
      }
    )
  };

  let on_action = {
    let controls = controls.clone();
    Callback::from(
      move |action: ItemAction| {
        ui_debug(
          "action.click",
          &format!(
            "{:?} {}",
            action.kind, action.id
          )
        );
        let changed = controls
          .board()
          .borrow_mut()
          .dispatch(&action, &WindowPrompter);
        tracing::debug!(
          changed,
          "item action handled"
        );
      }
    )
  };

  let on_form_change = {
    let form = form.clone();
    Callback::from(move |next: TaskForm| {
      form.set(next);
    })
  };

  let on_submit = {
    let controls = controls.clone();
    let form = form.clone();
    Callback::from(
      move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        let mut draft = (*form).clone();
        let created = controls
          .board()
          .borrow_mut()
          .submit(&mut draft);
        if let Some(id) = created {
          ui_debug(
            "form.submit",
            &format!("created {id}")
          );
        }
        form.set(draft);
      }
    )
  };

  let total =
    controls.board().borrow().store().len();

  html! {
      <div class="app">
          <FiltersPanel
              search_value={(*search).clone()}
              on_search_input={on_search_input}
              status_value={(*status).clone()}
              on_status_change={on_status_change}
              priority_value={(*priority).clone()}
              on_priority_change={on_priority_change}
          />
          <TaskFormPanel
              form={(*form).clone()}
              on_change={on_form_change}
              on_submit={on_submit}
          />
          <TaskList
              items={(*items).clone()}
              total={total}
              on_action={on_action}
          />
      </div>
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
