//! Persisted player progression
//!
//! High score, coin balance, unlocked skins and the equipped skin. Each field
//! is stored under its own key and written as soon as it changes.

use crate::persistence::KeyValueStore;
use crate::shop::{DEFAULT_SKIN, SKINS, skin_index};

/// Storage keys
pub const HIGH_SCORE_KEY: &str = "flappyCatHighScore";
pub const COINS_KEY: &str = "flappyCatCoinCount";
pub const UNLOCKED_KEY: &str = "flappyCatUnlockedCats";
pub const SELECTED_KEY: &str = "flappyCatSelectedCat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    pub high_score: u64,
    pub coins: u64,
    /// Unlocked skin ids, in unlock order; always contains the default skin
    pub unlocked: Vec<String>,
    /// Index into `SKINS` of the equipped skin
    pub selected: usize,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            high_score: 0,
            coins: 0,
            unlocked: vec![DEFAULT_SKIN.to_string()],
            selected: 0,
        }
    }
}

impl Progression {
    /// Load from storage, defaulting anything missing or malformed
    pub fn load(store: &impl KeyValueStore) -> Self {
        let high_score = store.get_u64(HIGH_SCORE_KEY).unwrap_or(0);
        let coins = store.get_u64(COINS_KEY).unwrap_or(0);

        let mut unlocked = vec![DEFAULT_SKIN.to_string()];
        for id in store
            .get_json::<Vec<String>>(UNLOCKED_KEY)
            .unwrap_or_default()
        {
            if skin_index(&id).is_none() {
                log::warn!("Dropping unknown skin id '{}'", id);
            } else if !unlocked.contains(&id) {
                unlocked.push(id);
            }
        }

        let selected = store
            .get_u64(SELECTED_KEY)
            .map(|i| i as usize)
            .filter(|&i| i < SKINS.len() && unlocked.iter().any(|id| id == SKINS[i].id))
            .unwrap_or(0);

        log::info!(
            "Loaded progression: high score {}, {} coins, {} skins",
            high_score,
            coins,
            unlocked.len()
        );

        Self {
            high_score,
            coins,
            unlocked,
            selected,
        }
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }

    /// The equipped skin
    pub fn skin(&self) -> &'static crate::shop::Skin {
        &SKINS[self.selected.min(SKINS.len() - 1)]
    }

    /// Record a finished run. Returns true if it set a new high score.
    pub fn record_score(&mut self, score: u64, store: &mut impl KeyValueStore) -> bool {
        if score > self.high_score {
            self.high_score = score;
            store.set_u64(HIGH_SCORE_KEY, score);
            log::info!("New high score: {}", score);
            true
        } else {
            false
        }
    }

    pub fn add_coins(&mut self, amount: u64, store: &mut impl KeyValueStore) {
        self.coins = self.coins.saturating_add(amount);
        store.set_u64(COINS_KEY, self.coins);
    }

    /// Deduct coins; callers check the balance first
    pub fn spend(&mut self, amount: u64, store: &mut impl KeyValueStore) {
        debug_assert!(amount <= self.coins);
        self.coins = self.coins.saturating_sub(amount);
        store.set_u64(COINS_KEY, self.coins);
    }

    pub fn unlock(&mut self, id: &str, store: &mut impl KeyValueStore) {
        if !self.is_unlocked(id) {
            self.unlocked.push(id.to_string());
            store.set_json(UNLOCKED_KEY, &self.unlocked);
        }
    }

    pub fn select(&mut self, index: usize, store: &mut impl KeyValueStore) {
        self.selected = index;
        store.set_u64(SELECTED_KEY, index as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn test_first_run_defaults() {
        let store = MemoryStore::new();
        let progression = Progression::load(&store);
        assert_eq!(progression, Progression::default());
        assert!(progression.is_unlocked("classic"));
        assert_eq!(progression.skin().id, "classic");
    }

    #[test]
    fn test_malformed_values_default() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "NaN");
        store.set(COINS_KEY, "");
        store.set(UNLOCKED_KEY, "classic,joyful");
        store.set(SELECTED_KEY, "2");
        let progression = Progression::load(&store);
        assert_eq!(progression.high_score, 0);
        assert_eq!(progression.coins, 0);
        assert_eq!(progression.unlocked, vec!["classic".to_string()]);
        // Skin 2 is not unlocked, so selection falls back
        assert_eq!(progression.selected, 0);
    }

    #[test]
    fn test_unlocked_list_is_repaired() {
        let mut store = MemoryStore::new();
        store.set(UNLOCKED_KEY, r#"["smitten", "dragon", "smitten"]"#);
        store.set(SELECTED_KEY, "3");
        let progression = Progression::load(&store);
        assert_eq!(
            progression.unlocked,
            vec!["classic".to_string(), "smitten".to_string()]
        );
        assert_eq!(progression.selected, 3);
    }

    #[test]
    fn test_out_of_range_selection() {
        let mut store = MemoryStore::new();
        store.set(SELECTED_KEY, "99");
        assert_eq!(Progression::load(&store).selected, 0);
    }

    #[test]
    fn test_record_score_persists_only_improvements() {
        let mut store = MemoryStore::new();
        let mut progression = Progression::load(&store);

        assert!(progression.record_score(7, &mut store));
        assert!(!progression.record_score(3, &mut store));
        assert!(!progression.record_score(7, &mut store));
        assert_eq!(progression.high_score, 7);
        assert_eq!(store.get_u64(HIGH_SCORE_KEY), Some(7));
    }

    #[test]
    fn test_coins_persist() {
        let mut store = MemoryStore::new();
        let mut progression = Progression::load(&store);
        progression.add_coins(3, &mut store);
        progression.add_coins(2, &mut store);
        assert_eq!(Progression::load(&store).coins, 5);
    }

    proptest! {
        #[test]
        fn high_score_never_decreases(scores in proptest::collection::vec(0u64..1000, 1..20)) {
            let mut store = MemoryStore::new();
            let mut progression = Progression::load(&store);
            let mut best = 0;
            for score in scores {
                let before = progression.high_score;
                progression.record_score(score, &mut store);
                best = best.max(score);
                prop_assert!(progression.high_score >= before);
                prop_assert_eq!(progression.high_score, best);
                prop_assert_eq!(store.get_u64(HIGH_SCORE_KEY).unwrap_or(0), best);
            }
        }
    }
}
