//! Timer seam. The browser build backs it with gloo-timers; tests step a
//! manual clock so interval polling and request timeouts are deterministic.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use futures::future::LocalBoxFuture;
use tracing::debug;

pub trait Clock {
    /// Calls `tick` every `period` until the returned handle is dropped.
    fn every(&self, period: Duration, tick: Rc<dyn Fn()>) -> TimerHandle;

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Cancels its timer when dropped.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Start/stop lifecycle around a periodic tick. Starting twice keeps a single
/// timer; dropping the value stops it.
#[derive(Default)]
pub struct AutoRefresh {
    timer: RefCell<Option<TimerHandle>>,
}

impl AutoRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self, clock: &dyn Clock, period: Duration, tick: Rc<dyn Fn()>) {
        let mut timer = self.timer.borrow_mut();
        if timer.is_none() {
            debug!(period_ms = period.as_millis() as u64, "auto refresh started");
            *timer = Some(clock.every(period, tick));
        }
    }

    pub fn stop(&self) {
        let timer = self.timer.borrow_mut().take();
        if let Some(timer) = timer {
            debug!("auto refresh stopped");
            timer.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.borrow().is_some()
    }
}
