//! Fixed-period tick driver.
//!
//! `draw_web()` calls at ~60fps with a variable delta. `TickDriver` turns
//! the frame timestamps into at most one handler call per elapsed period.
//! Late frames do not catch up: whatever whole periods were missed are
//! dropped and counted in `skipped`.
//!
//! The handler lives in a single shared slot. Replacing it through the
//! subscription means the next firing always runs the newest closure, and
//! dropping the subscription empties the slot so nothing fires afterwards.

use std::cell::RefCell;
use std::rc::Rc;

/// Period of the passive-income timer.
pub const TICK_PERIOD_MS: f64 = 1000.0;

pub type TickHandler = Box<dyn FnMut()>;

type Slot = Rc<RefCell<Option<TickHandler>>>;

pub struct TickDriver {
    period_ms: f64,
    /// Milliseconds accumulated towards the next firing.
    accumulator: f64,
    /// Timestamp of the last `advance` (ms), None before the first frame.
    last_timestamp: Option<f64>,
    slot: Slot,
    fired: u64,
    skipped: u64,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD_MS)
    }

    pub fn with_period(period_ms: f64) -> Self {
        Self {
            period_ms,
            accumulator: 0.0,
            last_timestamp: None,
            slot: Rc::new(RefCell::new(None)),
            fired: 0,
            skipped: 0,
        }
    }

    /// Install `handler` and start firing it. A previous subscription is
    /// detached: its handler stops firing and dropping it is a no-op here.
    pub fn subscribe(&mut self, handler: TickHandler) -> TickSubscription {
        self.slot.borrow_mut().take();
        self.slot = Rc::new(RefCell::new(Some(handler)));
        self.accumulator = 0.0;
        TickSubscription {
            slot: Some(self.slot.clone()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Feed a frame timestamp (from `performance.now()` or similar).
    /// Returns true if the handler fired.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        if !self.is_active() {
            self.accumulator = 0.0;
            return false;
        }

        self.accumulator += delta;
        if self.accumulator < self.period_ms {
            return false;
        }

        let periods = (self.accumulator / self.period_ms) as u64;
        self.skipped += periods - 1;
        self.accumulator -= periods as f64 * self.period_ms;

        // Take the handler out while it runs so a handler that replaces or
        // cancels the subscription does not hit a RefCell double borrow.
        let handler = self.slot.borrow_mut().take();
        if let Some(mut handler) = handler {
            handler();
            self.fired += 1;
            let mut slot = self.slot.borrow_mut();
            if slot.is_none() && Rc::strong_count(&self.slot) > 1 {
                *slot = Some(handler);
            }
            return true;
        }
        false
    }

    /// Number of handler calls so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Whole periods dropped because a frame arrived late.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

/// Owner of a running tick handler. Dropping it stops the ticking.
pub struct TickSubscription {
    slot: Option<Slot>,
}

impl TickSubscription {
    /// Swap in a new handler; the next firing calls it.
    pub fn replace(&self, handler: TickHandler) {
        if let Some(slot) = &self.slot {
            *slot.borrow_mut() = Some(handler);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.slot.is_none()
    }

    /// Stop ticking. Same as dropping the subscription.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(slot) = self.slot.take() {
            slot.borrow_mut().take();
        }
    }
}

impl Drop for TickSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
