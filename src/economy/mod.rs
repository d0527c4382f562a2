//! Economy state machine: balance, passive rate, owned upgrade counts.
//!
//! Everything in here is plain data plus pure-ish mutation, with no browser
//! or rendering types, so the whole module is testable natively.
//!
//! `rate` is a cached value maintained on purchase. `tick` does not trust it
//! and recomputes the passive amount from the owned counts every time; the
//! two paths must always agree (see the proptests at the bottom).

pub mod catalog;
pub mod error;

use serde::Serialize;

pub use catalog::{UpgradeId, UpgradeType, CATALOG};
pub use error::PurchaseError;

/// Owned count of one upgrade type, as exposed in a [`Snapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OwnedCount {
    pub id: UpgradeId,
    pub count: u64,
}

/// Read-only copy of the counters, handed to observers and the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub balance: u64,
    pub rate: u64,
    /// One entry per catalog entry, in catalog order.
    pub owned: Vec<OwnedCount>,
}

impl Snapshot {
    /// Owned count for `id`, 0 if the id is not in the catalog.
    pub fn owned(&self, id: UpgradeId) -> u64 {
        self.owned
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.count)
            .unwrap_or(0)
    }
}

/// What changed, passed to observers together with the new snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EconomyEvent {
    Clicked,
    Purchased { id: UpgradeId },
    Ticked { amount: u64 },
}

/// Result of a successful purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub id: UpgradeId,
    pub name: &'static str,
    pub cost: u64,
    /// Owned count after the purchase.
    pub owned: u64,
}

/// Handle returned by [`Economy::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObserverId(u64);

pub type Observer = Box<dyn FnMut(&Snapshot, &EconomyEvent)>;

pub struct Economy {
    catalog: &'static [UpgradeType],
    balance: u64,
    rate: u64,
    /// Parallel to `catalog`.
    owned: Vec<u64>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl Economy {
    /// Fresh session state over `catalog`: balance 0, rate 0, nothing owned.
    pub fn new(catalog: &'static [UpgradeType]) -> Self {
        Self {
            catalog,
            balance: 0,
            rate: 0,
            owned: vec![0; catalog.len()],
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn catalog(&self) -> &'static [UpgradeType] {
        self.catalog
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Cached passive rate (currency per tick).
    pub fn rate(&self) -> u64 {
        self.rate
    }

    pub fn owned(&self, id: UpgradeId) -> u64 {
        catalog::find(self.catalog, id)
            .map(|(idx, _)| self.owned[idx])
            .unwrap_or(0)
    }

    /// Full recompute of `Σ value * owned` from the raw counts.
    pub fn recomputed_rate(&self) -> u64 {
        self.catalog
            .iter()
            .zip(&self.owned)
            .fold(0u64, |acc, (u, &n)| acc.saturating_add(u.value.saturating_mul(n)))
    }

    pub fn can_afford(&self, id: UpgradeId) -> bool {
        catalog::find(self.catalog, id).is_some_and(|(_, u)| self.balance >= u.cost)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            balance: self.balance,
            rate: self.rate,
            owned: self
                .catalog
                .iter()
                .zip(&self.owned)
                .map(|(u, &count)| OwnedCount { id: u.id, count })
                .collect(),
        }
    }

    /// Manual click: +1, never fails.
    pub fn manual_increment(&mut self) {
        self.balance = self.balance.saturating_add(1);
        self.notify(&EconomyEvent::Clicked);
    }

    /// Buy one unit of `id`. On any error nothing changes and nobody is notified.
    pub fn purchase(&mut self, id: UpgradeId) -> Result<Receipt, PurchaseError> {
        let (idx, upgrade) = catalog::find(self.catalog, id)
            .ok_or_else(|| PurchaseError::UnknownUpgrade(id.as_str().to_string()))?;
        let upgrade = *upgrade;

        if self.balance < upgrade.cost {
            return Err(PurchaseError::InsufficientFunds {
                id,
                cost: upgrade.cost,
                balance: self.balance,
            });
        }

        self.balance -= upgrade.cost;
        self.owned[idx] += 1;
        self.rate = self.rate.saturating_add(upgrade.value);

        let receipt = Receipt {
            id,
            name: upgrade.name,
            cost: upgrade.cost,
            owned: self.owned[idx],
        };
        self.notify(&EconomyEvent::Purchased { id });
        Ok(receipt)
    }

    /// String-keyed variant of [`purchase`](Self::purchase).
    pub fn purchase_by_key(&mut self, key: &str) -> Result<Receipt, PurchaseError> {
        let id = UpgradeId::from_key(key)
            .ok_or_else(|| PurchaseError::UnknownUpgrade(key.to_string()))?;
        self.purchase(id)
    }

    /// One timer firing. Returns the amount added.
    pub fn tick(&mut self) -> u64 {
        let amount = self.recomputed_rate();
        self.balance = self.balance.saturating_add(amount);
        self.notify(&EconomyEvent::Ticked { amount });
        amount
    }

    /// Register a change observer. It is called after every successful mutation.
    pub fn subscribe(&mut self, observer: Observer) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns false if `id` was not (or no longer) registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    fn notify(&mut self, event: &EconomyEvent) {
        if self.observers.is_empty() {
            return;
        }
        let snap = self.snapshot();
        for (_, observer) in &mut self.observers {
            observer(&snap, event);
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        Click(u16),
        Buy(UpgradeId),
        Tick,
    }

    fn arb_upgrade_id() -> impl Strategy<Value = UpgradeId> {
        prop_oneof![
            Just(UpgradeId::Cursor),
            Just(UpgradeId::Grandma),
            Just(UpgradeId::Farm),
        ]
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1u16..300).prop_map(Op::Click),
            arb_upgrade_id().prop_map(Op::Buy),
            Just(Op::Tick),
        ]
    }

    fn apply(e: &mut Economy, op: &Op) {
        match op {
            Op::Click(n) => {
                for _ in 0..*n {
                    e.manual_increment();
                }
            }
            Op::Buy(id) => {
                let _ = e.purchase(*id);
            }
            Op::Tick => {
                e.tick();
            }
        }
    }

    proptest! {
        #[test]
        fn prop_cached_rate_matches_recompute(ops in prop::collection::vec(arb_op(), 0..80)) {
            let mut e = Economy::new(CATALOG);
            for op in &ops {
                apply(&mut e, op);
                prop_assert_eq!(e.rate(), e.recomputed_rate());
                let expected: u64 = CATALOG.iter().map(|u| u.value * e.owned(u.id)).sum();
                prop_assert_eq!(e.rate(), expected);
            }
        }

        #[test]
        fn prop_purchase_is_all_or_nothing(
            ops in prop::collection::vec(arb_op(), 0..40),
            id in arb_upgrade_id(),
        ) {
            let mut e = Economy::new(CATALOG);
            for op in &ops {
                apply(&mut e, op);
            }
            let before = e.snapshot();
            let upgrade = *catalog::find(CATALOG, id).unwrap().1;
            match e.purchase(id) {
                Ok(receipt) => {
                    prop_assert!(before.balance >= upgrade.cost);
                    prop_assert_eq!(e.balance(), before.balance - upgrade.cost);
                    prop_assert_eq!(e.owned(id), before.owned(id) + 1);
                    prop_assert_eq!(e.rate(), before.rate + upgrade.value);
                    prop_assert_eq!(receipt.owned, e.owned(id));
                }
                Err(err) => {
                    prop_assert!(before.balance < upgrade.cost);
                    let is_insufficient = matches!(err, PurchaseError::InsufficientFunds { .. });
                    prop_assert!(is_insufficient);
                    prop_assert_eq!(e.snapshot(), before);
                }
            }
        }

        #[test]
        fn prop_tick_adds_exactly_rate(ops in prop::collection::vec(arb_op(), 0..40)) {
            let mut e = Economy::new(CATALOG);
            for op in &ops {
                apply(&mut e, op);
            }
            let before = e.snapshot();
            let added = e.tick();
            prop_assert_eq!(added, before.rate);
            prop_assert_eq!(e.balance(), before.balance + before.rate);
            prop_assert_eq!(e.rate(), before.rate);
            prop_assert_eq!(e.snapshot().owned, before.owned);
        }

        #[test]
        fn prop_manual_increment_adds_one(ops in prop::collection::vec(arb_op(), 0..40)) {
            let mut e = Economy::new(CATALOG);
            for op in &ops {
                apply(&mut e, op);
            }
            let before = e.snapshot();
            e.manual_increment();
            let after = e.snapshot();
            prop_assert_eq!(after.balance, before.balance + 1);
            prop_assert_eq!(after.rate, before.rate);
            prop_assert_eq!(after.owned, before.owned);
        }
    }
}
