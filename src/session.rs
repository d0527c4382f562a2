//! One play session: an economy, its tick subscription, and the message log.
//!
//! The session is the only owner of the tick subscription. Dropping the
//! session drops the subscription, which stops passive income for good.

use std::cell::RefCell;
use std::rc::Rc;

use crate::console;
use crate::economy::{
    Economy, EconomyEvent, PurchaseError, Receipt, Snapshot, UpgradeId, UpgradeType, CATALOG,
};
use crate::time::{TickDriver, TickSubscription};

/// Maximum number of message log entries kept.
pub const LOG_CAPACITY: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// What the change observer saw last. Read by the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Activity {
    /// Bumped on every state change.
    pub revision: u64,
    pub last_tick_amount: u64,
    pub total_clicks: u64,
}

pub struct Session {
    economy: Rc<RefCell<Economy>>,
    activity: Rc<RefCell<Activity>>,
    driver: TickDriver,
    ticking: Option<TickSubscription>,
    log: Vec<LogEntry>,
}

impl Session {
    pub fn start() -> Self {
        Self::with_driver(CATALOG, TickDriver::new())
    }

    pub fn with_driver(catalog: &'static [UpgradeType], mut driver: TickDriver) -> Self {
        let economy = Rc::new(RefCell::new(Economy::new(catalog)));
        let activity = Rc::new(RefCell::new(Activity::default()));

        economy.borrow_mut().subscribe(Box::new({
            let activity = activity.clone();
            move |snap: &Snapshot, event: &EconomyEvent| {
                let mut a = activity.borrow_mut();
                a.revision += 1;
                match event {
                    EconomyEvent::Clicked => a.total_clicks += 1,
                    EconomyEvent::Ticked { amount } => a.last_tick_amount = *amount,
                    EconomyEvent::Purchased { id } => {
                        console::info_with(&format!("bought {id}"), snap);
                    }
                }
            }
        }));

        let ticking = driver.subscribe(Box::new({
            let economy = economy.clone();
            move || {
                economy.borrow_mut().tick();
            }
        }));

        console::info("session started");

        Self {
            economy,
            activity,
            driver,
            ticking: Some(ticking),
            log: vec![LogEntry {
                text: "Welcome to Cookie Clicker Workshop!".into(),
                is_important: true,
            }],
        }
    }

    /// Manual click on the cookie.
    pub fn click(&mut self) {
        self.economy.borrow_mut().manual_increment();
    }

    /// Try to buy one unit. Both outcomes are logged; a refusal changes nothing else.
    pub fn buy(&mut self, id: UpgradeId) -> Result<Receipt, PurchaseError> {
        let result = self.economy.borrow_mut().purchase(id);
        match &result {
            Ok(receipt) => {
                self.add_log(
                    &format!("Bought a {} ({} owned)", receipt.name, receipt.owned),
                    false,
                );
            }
            Err(err) => {
                console::warn_with(&err.to_string(), &self.snapshot());
                self.add_log(&format!("Purchase refused: {err}"), true);
            }
        }
        result
    }

    /// Feed a frame timestamp. Returns true if a tick fired.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.driver.advance(now_ms)
    }

    /// Stop passive income. Idempotent.
    pub fn stop_ticking(&mut self) {
        if let Some(sub) = self.ticking.take() {
            sub.cancel();
            console::info_with("session ended", &self.snapshot());
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking.is_some() && self.driver.is_active()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.economy.borrow().snapshot()
    }

    pub fn catalog(&self) -> &'static [UpgradeType] {
        self.economy.borrow().catalog()
    }

    pub fn can_afford(&self, id: UpgradeId) -> bool {
        self.economy.borrow().can_afford(id)
    }

    pub fn activity(&self) -> Activity {
        self.activity.borrow().clone()
    }

    pub fn ticks_fired(&self) -> u64 {
        self.driver.fired()
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop_ticking();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::start()
    }

    #[test]
    fn starts_with_welcome_and_zero_state() {
        let s = session();
        let snap = s.snapshot();
        assert_eq!(snap.balance, 0);
        assert_eq!(snap.rate, 0);
        assert_eq!(s.log().len(), 1);
        assert!(s.is_ticking());
    }

    #[test]
    fn click_goes_through_observer() {
        let mut s = session();
        s.click();
        s.click();
        assert_eq!(s.snapshot().balance, 2);
        let a = s.activity();
        assert_eq!(a.total_clicks, 2);
        assert_eq!(a.revision, 2);
    }

    #[test]
    fn buy_failure_is_logged_and_harmless() {
        let mut s = session();
        let before = s.snapshot();
        let err = s.buy(UpgradeId::Cursor).unwrap_err();
        assert!(matches!(err, PurchaseError::InsufficientFunds { .. }));
        assert_eq!(s.snapshot(), before);
        let last = s.log().last().unwrap();
        assert!(last.is_important);
        assert!(last.text.starts_with("Purchase refused: not enough cookies"));
        assert_eq!(s.activity().revision, 0);
    }

    #[test]
    fn buy_success_is_logged() {
        let mut s = session();
        for _ in 0..10 {
            s.click();
        }
        let receipt = s.buy(UpgradeId::Cursor).unwrap();
        assert_eq!(receipt.owned, 1);
        assert_eq!(s.log().last().unwrap().text, "Bought a Cursor (1 owned)");
    }

    #[test]
    fn frames_drive_passive_income() {
        let mut s = session();
        for _ in 0..10 {
            s.click();
        }
        s.buy(UpgradeId::Cursor).unwrap();
        assert!(!s.frame(0.0));
        assert!(!s.frame(500.0));
        assert!(s.frame(1_000.0));
        assert_eq!(s.snapshot().balance, 1);
        assert_eq!(s.activity().last_tick_amount, 1);
        assert_eq!(s.ticks_fired(), 1);
    }

    #[test]
    fn late_frame_pays_one_tick_only() {
        let mut s = session();
        for _ in 0..100 {
            s.click();
        }
        s.buy(UpgradeId::Grandma).unwrap();
        s.frame(0.0);
        s.frame(30_000.0);
        assert_eq!(s.snapshot().balance, 10);
    }

    #[test]
    fn stop_ticking_is_idempotent() {
        let mut s = session();
        for _ in 0..10 {
            s.click();
        }
        s.buy(UpgradeId::Cursor).unwrap();
        s.stop_ticking();
        s.stop_ticking();
        assert!(!s.is_ticking());
        s.frame(0.0);
        assert!(!s.frame(5_000.0));
        assert_eq!(s.snapshot().balance, 0);
    }

    #[test]
    fn drop_releases_the_economy() {
        let s = session();
        let economy = Rc::downgrade(&s.economy);
        drop(s);
        assert!(economy.upgrade().is_none());
    }

    #[test]
    fn log_truncation() {
        let mut s = session();
        for i in 0..60 {
            s.add_log(&format!("msg {}", i), false);
        }
        assert_eq!(s.log().len(), LOG_CAPACITY);
        assert_eq!(s.log().last().unwrap().text, "msg 59");
    }

    #[test]
    fn custom_period_driver() {
        let mut s = Session::with_driver(CATALOG, TickDriver::with_period(100.0));
        for _ in 0..10 {
            s.click();
        }
        s.buy(UpgradeId::Cursor).unwrap();
        s.frame(0.0);
        s.frame(100.0);
        s.frame(200.0);
        assert_eq!(s.snapshot().balance, 2);
    }
}
