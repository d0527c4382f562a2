/// Static upgrade catalog.

use std::fmt;

use serde::Serialize;

/// Identifier of a purchasable upgrade type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeId {
    Cursor,
    Grandma,
    Farm,
}

impl UpgradeId {
    /// Stable string key (`"cursor"`, `"grandma"`, `"farm"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeId::Cursor => "cursor",
            UpgradeId::Grandma => "grandma",
            UpgradeId::Farm => "farm",
        }
    }

    /// Resolve a string key. Returns `None` for anything not in the fixed set.
    pub fn from_key(key: &str) -> Option<UpgradeId> {
        match key {
            "cursor" => Some(UpgradeId::Cursor),
            "grandma" => Some(UpgradeId::Grandma),
            "farm" => Some(UpgradeId::Farm),
            _ => None,
        }
    }

    /// Hotkey used by the render surface (1-3, catalog order).
    pub fn key(&self) -> char {
        match self {
            UpgradeId::Cursor => '1',
            UpgradeId::Grandma => '2',
            UpgradeId::Farm => '3',
        }
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry. `value` is currency per second per unit owned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpgradeType {
    pub id: UpgradeId,
    pub name: &'static str,
    pub cost: u64,
    pub value: u64,
}

/// The bundled catalog, in display order.
pub const CATALOG: &[UpgradeType] = &[
    UpgradeType {
        id: UpgradeId::Cursor,
        name: "Cursor",
        cost: 10,
        value: 1,
    },
    UpgradeType {
        id: UpgradeId::Grandma,
        name: "Grandma",
        cost: 100,
        value: 10,
    },
    UpgradeType {
        id: UpgradeId::Farm,
        name: "Farm",
        cost: 1_000,
        value: 80,
    },
];

/// Look up an entry by id in an arbitrary catalog.
pub fn find(catalog: &[UpgradeType], id: UpgradeId) -> Option<(usize, &UpgradeType)> {
    catalog.iter().enumerate().find(|(_, u)| u.id == id)
}
