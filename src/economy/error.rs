use thiserror::Error;

use super::catalog::UpgradeId;

/// Why a purchase was refused. State is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("not enough cookies for {id}: costs {cost}, have {balance}")]
    InsufficientFunds { id: UpgradeId, cost: u64, balance: u64 },
    #[error("unknown upgrade `{0}`")]
    UnknownUpgrade(String),
}
