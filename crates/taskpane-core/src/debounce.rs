//! Trailing-edge debounce over an event
//! loop timer.
//!
//! [`Scheduler`] is the timer seam: the
//! browser frontend backs it with
//! `setTimeout`, tests and the preview
//! tool with [`ManualScheduler`], a
//! virtual clock that only moves when
//! told to.

use std::cell::{
  Cell,
  RefCell
};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;

pub trait Scheduler {
  type Handle;

  /// Runs `callback` once, `delay` from
  /// now, unless cancelled first.
  fn schedule(
    &self,
    delay: Duration,
    callback: Box<dyn FnOnce()>
  ) -> Self::Handle;

  /// Cancelling a handle whose callback
  /// already ran is a no-op.
  fn cancel(&self, handle: Self::Handle);
}

struct Shared<A, S: Scheduler> {
  scheduler: S,
  delay:     Duration,
  target:    Rc<dyn Fn(A)>,
  pending:   RefCell<Option<S::Handle>>,
  armed:     Rc<Cell<bool>>
}

/// Callable returned by [`debounce`].
/// Clones share one pending timer.
pub struct Debounced<A, S: Scheduler> {
  shared: Rc<Shared<A, S>>
}

impl<A, S: Scheduler> Clone
  for Debounced<A, S>
{
  fn clone(&self) -> Self {
    Self {
      shared: Rc::clone(&self.shared)
    }
  }
}

/// Wraps `f` so that only the last call
/// in any `delay` window reaches it,
/// `delay` after that call.
pub fn debounce<A, S, F>(
  scheduler: S,
  delay: Duration,
  f: F
) -> Debounced<A, S>
where
  S: Scheduler,
  F: Fn(A) + 'static
{
  Debounced {
    shared: Rc::new(Shared {
      scheduler,
      delay,
      target: Rc::new(f),
      pending: RefCell::new(None),
      armed: Rc::new(Cell::new(false))
    })
  }
}

impl<A, S> Debounced<A, S>
where
  A: 'static,
  S: Scheduler
{
  pub fn call(&self, args: A) {
    self.cancel();

    let target =
      Rc::clone(&self.shared.target);
    let armed =
      Rc::clone(&self.shared.armed);
    armed.set(true);

    let handle =
      self.shared.scheduler.schedule(
        self.shared.delay,
        Box::new(move || {
          armed.set(false);
          target(args);
        })
      );
    trace!(
      delay_ms = u64::try_from(
        self.shared.delay.as_millis()
      )
      .unwrap_or(u64::MAX),
      "debounced call scheduled"
    );
    *self.shared.pending.borrow_mut() =
      Some(handle);
  }

  /// Drops the scheduled call, if any.
  pub fn cancel(&self) {
    let previous = self
      .shared
      .pending
      .borrow_mut()
      .take();
    if let Some(handle) = previous {
      if self.shared.armed.get() {
        trace!(
          "superseding pending \
           debounced call"
        );
      }
      self.shared.scheduler.cancel(handle);
    }
    self.shared.armed.set(false);
  }

  pub fn is_pending(&self) -> bool {
    self.shared.armed.get()
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
)]
pub struct TimerHandle {
  due: Duration,
  seq: u64
}

#[derive(Default)]
struct Timeline {
  now:      Duration,
  next_seq: u64,
  queue:
    BTreeMap<TimerHandle, Box<dyn FnOnce()>>
}

/// Single-threaded virtual-time event
/// loop. Timers fire in due order (ties
/// in scheduling order) when the clock
/// is advanced past them.
#[derive(Clone, Default)]
pub struct ManualScheduler {
  timeline: Rc<RefCell<Timeline>>
}

impl ManualScheduler {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn now(&self) -> Duration {
    self.timeline.borrow().now
  }

  pub fn pending(&self) -> usize {
    self.timeline.borrow().queue.len()
  }

  /// Moves the clock forward by `by`,
  /// running every timer that falls due.
  /// Timers scheduled by a running
  /// callback fire in the same pass if
  /// they fall inside the window.
  pub fn advance(&self, by: Duration) {
    let target = self.now() + by;

    loop {
      let next = {
        let mut timeline =
          self.timeline.borrow_mut();
        let due = timeline
          .queue
          .first_key_value()
          .map(|(handle, _)| *handle)
          .filter(|handle| {
            handle.due <= target
          });
        match due {
          | Some(handle) => {
            timeline.now = handle.due;
            timeline.queue.remove(&handle)
          }
          | None => None
        }
      };

      match next {
        | Some(callback) => callback(),
        | None => break
      }
    }

    self.timeline.borrow_mut().now = target;
  }

  /// Runs every queued timer.
  pub fn run_until_idle(&self) {
    loop {
      let next_due = self
        .timeline
        .borrow()
        .queue
        .first_key_value()
        .map(|(handle, _)| handle.due);
      let Some(due) = next_due else {
        break;
      };
      let now = self.now();
      self.advance(
        due.saturating_sub(now)
      );
    }
  }
}

impl Scheduler for ManualScheduler {
  type Handle = TimerHandle;

  fn schedule(
    &self,
    delay: Duration,
    callback: Box<dyn FnOnce()>
  ) -> TimerHandle {
    let mut timeline =
      self.timeline.borrow_mut();
    let handle = TimerHandle {
      due: timeline.now + delay,
      seq: timeline.next_seq
    };
    timeline.next_seq += 1;
    timeline.queue.insert(handle, callback);
    handle
  }

  fn cancel(&self, handle: TimerHandle) {
    self
      .timeline
      .borrow_mut()
      .queue
      .remove(&handle);
  }
}
