use std::cell::RefCell;
use std::collections::VecDeque;

/// Blocking user dialogs the mutation
/// actions depend on.
pub trait Prompter {
  /// Yes/no question. `false` means
  /// declined.
  fn confirm(&self, message: &str) -> bool;

  /// Free-text question pre-filled with
  /// `default`. `None` means cancelled.
  fn prompt(
    &self,
    message: &str,
    default: &str
  ) -> Option<String>;
}

/// Dialog answer queued on a
/// [`ScriptedPrompter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
  Confirm(bool),
  Text(Option<String>)
}

/// Replays queued answers in order and
/// records every question asked. With
/// nothing queued it declines and
/// cancels.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
  answers: RefCell<VecDeque<Answer>>,
  asked:   RefCell<Vec<String>>
}

impl ScriptedPrompter {
  pub fn new<I>(answers: I) -> Self
  where
    I: IntoIterator<Item = Answer>
  {
    Self {
      answers: RefCell::new(
        answers.into_iter().collect()
      ),
      asked:   RefCell::new(vec![])
    }
  }

  pub fn asked(&self) -> Vec<String> {
    self.asked.borrow().clone()
  }

  fn next(&self) -> Option<Answer> {
    self.answers.borrow_mut().pop_front()
  }
}

impl Prompter for ScriptedPrompter {
  fn confirm(&self, message: &str) -> bool {
    self
      .asked
      .borrow_mut()
      .push(message.to_string());
    matches!(
      self.next(),
      Some(Answer::Confirm(true))
    )
  }

  fn prompt(
    &self,
    message: &str,
    default: &str
  ) -> Option<String> {
    self
      .asked
      .borrow_mut()
      .push(format!("{message} [{default}]"));
    match self.next() {
      | Some(Answer::Text(text)) => text,
      | _ => None
    }
  }
}
