//! Debounce and throttle wrappers for noisy browser events.
//!
//! None of the page behaviors use these yet; scroll handlers are cheap
//! enough to run on every event.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Runs the callback once, `wait_ms` after the most recent call.
pub struct Debounce<T: 'static> {
    wait_ms: u32,
    callback: Rc<dyn Fn(T)>,
    pending: RefCell<Option<Timeout>>,
}

impl<T: 'static> Debounce<T> {
    pub fn new(wait_ms: u32, callback: impl Fn(T) + 'static) -> Self {
        Self {
            wait_ms,
            callback: Rc::new(callback),
            pending: RefCell::new(None),
        }
    }

    pub fn call(&self, arg: T) {
        let callback = self.callback.clone();
        let timeout = Timeout::new(self.wait_ms, move || callback(arg));
        // Dropping the previous Timeout clears it
        self.pending.replace(Some(timeout));
    }

    pub fn cancel(&self) {
        self.pending.replace(None);
    }
}

/// Runs the callback at most once per `limit_ms`; calls inside the window are dropped.
pub struct Throttle<T: 'static> {
    limit_ms: u32,
    callback: Rc<dyn Fn(T)>,
    cooling: Rc<Cell<bool>>,
}

impl<T: 'static> Throttle<T> {
    pub fn new(limit_ms: u32, callback: impl Fn(T) + 'static) -> Self {
        Self {
            limit_ms,
            callback: Rc::new(callback),
            cooling: Rc::new(Cell::new(false)),
        }
    }

    /// Returns whether this call went through.
    pub fn call(&self, arg: T) -> bool {
        if self.cooling.get() {
            return false;
        }
        (self.callback)(arg);
        self.cooling.set(true);
        let cooling = self.cooling.clone();
        Timeout::new(self.limit_ms, move || cooling.set(false)).forget();
        true
    }
}
