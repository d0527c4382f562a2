//! Click target action IDs and the mapping from input to session intents.

use crate::economy::{UpgradeId, UpgradeType};
use crate::input::InputEvent;

pub const CLICK_COOKIE: u16 = 0;

/// Upgrade purchase: base + catalog index.
pub const BUY_UPGRADE_BASE: u16 = 100;

/// What the player asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Click,
    Buy(UpgradeId),
}

/// Translate an input event into an intent. Unbound keys and stale click
/// IDs yield `None`.
pub fn intent_for(event: &InputEvent, catalog: &[UpgradeType]) -> Option<Intent> {
    match event {
        InputEvent::Key('c') | InputEvent::Key(' ') => Some(Intent::Click),
        InputEvent::Key(k) => catalog
            .iter()
            .find(|u| u.id.key() == *k)
            .map(|u| Intent::Buy(u.id)),
        InputEvent::Click(CLICK_COOKIE) => Some(Intent::Click),
        InputEvent::Click(id) if *id >= BUY_UPGRADE_BASE => {
            let idx = (*id - BUY_UPGRADE_BASE) as usize;
            catalog.get(idx).map(|u| Intent::Buy(u.id))
        }
        InputEvent::Click(_) => None,
    }
}
