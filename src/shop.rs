//! Cat skin catalog and purchasing
//!
//! Skins are cosmetic only. The first entry is free and always unlocked.

use crate::persistence::KeyValueStore;
use crate::progression::Progression;

/// A cosmetic player skin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    /// Stable identifier written to storage
    pub id: &'static str,
    /// Display glyph
    pub glyph: &'static str,
    /// Unlock cost in coins
    pub cost: u64,
}

/// All skins, in shop order
pub const SKINS: [Skin; 5] = [
    Skin {
        id: "classic",
        glyph: "🐱",
        cost: 0,
    },
    Skin {
        id: "grinning",
        glyph: "😺",
        cost: 10,
    },
    Skin {
        id: "joyful",
        glyph: "😸",
        cost: 25,
    },
    Skin {
        id: "smitten",
        glyph: "😻",
        cost: 50,
    },
    Skin {
        id: "kissy",
        glyph: "😽",
        cost: 100,
    },
];

/// Food glyphs, indexed by `Food::variant`
pub const FOOD_GLYPHS: [&str; 4] = ["🐟", "🍗", "🧀", "🥛"];

/// Id of the skin every player owns
pub const DEFAULT_SKIN: &str = SKINS[0].id;

/// Index of a skin by id
pub fn skin_index(id: &str) -> Option<usize> {
    SKINS.iter().position(|s| s.id == id)
}

/// What happened when a shop item was tapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Already owned, now equipped
    Selected,
    /// Bought and equipped
    Unlocked { cost: u64 },
    /// Not enough coins; nothing changed
    Rejected { cost: u64, balance: u64 },
    /// No such skin
    Unknown,
}

/// Select an owned skin, or buy and select a locked one if affordable
///
/// Any accepted change is written to the store before returning.
pub fn select_or_buy(
    progression: &mut Progression,
    index: usize,
    store: &mut impl KeyValueStore,
) -> PurchaseOutcome {
    let Some(skin) = SKINS.get(index) else {
        return PurchaseOutcome::Unknown;
    };

    if progression.is_unlocked(skin.id) {
        progression.select(index, store);
        log::info!("Equipped skin '{}'", skin.id);
        return PurchaseOutcome::Selected;
    }

    if progression.coins < skin.cost {
        log::info!(
            "Cannot afford skin '{}' ({} coins, have {})",
            skin.id,
            skin.cost,
            progression.coins
        );
        return PurchaseOutcome::Rejected {
            cost: skin.cost,
            balance: progression.coins,
        };
    }

    progression.spend(skin.cost, store);
    progression.unlock(skin.id, store);
    progression.select(index, store);
    log::info!("Unlocked skin '{}' for {} coins", skin.id, skin.cost);
    PurchaseOutcome::Unlocked { cost: skin.cost }
}
