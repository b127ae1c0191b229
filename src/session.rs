//! Session state machine
//!
//! `Session` is the single context object the frame driver owns. Input is
//! applied with `handle_input`, then `frame` runs one tick and hands back a
//! read-only `FrameView` for drawing. Nothing is drawn from input handlers.
//!
//! ```text
//! Menu --Start--> Playing --crash--> GameOver --Retry--> Playing
//!                                    GameOver --Shop---> Shop --Back--> Menu
//! ```

use glam::Vec2;

use crate::persistence::KeyValueStore;
use crate::platform::InputEvent;
use crate::progression::Progression;
use crate::shop::{PurchaseOutcome, SKINS, Skin, select_or_buy};
use crate::sim::world::drift_bubbles;
use crate::sim::{Food, GamePhase, GameState, RandomSource, TickOutcome, Viewport, physics, tick};
use crate::tuning::{Tuning, TuningError};
use crate::ui::{Button, UiLayout};

pub struct Session<S: KeyValueStore, R: RandomSource> {
    state: GameState,
    progression: Progression,
    tuning: Tuning,
    store: S,
    rng: R,
    /// Set when the last run beat the previous high score
    new_high_score: bool,
    /// Result of the most recent shop tap, cleared on leaving the shop
    last_purchase: Option<PurchaseOutcome>,
}

impl<S: KeyValueStore, R: RandomSource> Session<S, R> {
    /// Validate tuning, load progression and open at the menu
    pub fn new(width: f32, tuning: Tuning, store: S, mut rng: R) -> Result<Self, TuningError> {
        tuning.validate()?;
        let viewport = Viewport::new(width, &tuning)?;
        let progression = Progression::load(&store);
        let state = GameState::new(viewport, &tuning, &mut rng);
        log::info!(
            "Session ready: {}x{} canvas, ground at {}",
            viewport.width,
            viewport.height,
            viewport.ground_y
        );
        Ok(Self {
            state,
            progression,
            tuning,
            store,
            rng,
            new_high_score: false,
            last_purchase: None,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn layout(&self) -> UiLayout {
        UiLayout::new(&self.state.viewport)
    }

    /// Apply one input event
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Jump => self.jump(),
            InputEvent::Primary { pos } => self.primary(pos),
            InputEvent::Resize { width } => {
                if let Err(e) = self.resize(width) {
                    log::warn!("Ignoring resize to {}: {}", width, e);
                }
            }
        }
    }

    /// Rebuild the viewport for a new canvas width; the run continues
    pub fn resize(&mut self, width: f32) -> Result<(), TuningError> {
        let viewport = Viewport::new(width, &self.tuning)?;
        self.state.resize(viewport, &self.tuning);
        log::info!("Resized to {}x{}", viewport.width, viewport.height);
        Ok(())
    }

    fn jump(&mut self) {
        if self.state.phase == GamePhase::Playing {
            physics::jump(&mut self.state.player, self.tuning.jump_velocity);
        }
    }

    fn primary(&mut self, pos: Vec2) {
        if self.state.phase == GamePhase::Playing {
            self.jump();
            return;
        }
        if let Some(button) = self.layout().hit(self.state.phase, pos) {
            self.press(button);
        }
    }

    /// Activate a button if it exists in the current phase
    pub fn press(&mut self, button: Button) {
        match (self.state.phase, button) {
            (GamePhase::Menu, Button::Start) | (GamePhase::GameOver, Button::Retry) => {
                self.start_run();
            }
            (GamePhase::GameOver, Button::Shop) => {
                self.state.phase = GamePhase::Shop;
            }
            (GamePhase::Shop, Button::Back) => {
                self.last_purchase = None;
                self.state.phase = GamePhase::Menu;
            }
            (GamePhase::Shop, Button::ShopItem(index)) => {
                let outcome = select_or_buy(&mut self.progression, index, &mut self.store);
                self.last_purchase = Some(outcome);
            }
            (phase, button) => {
                log::debug!("{:?} has no effect in {:?}", button, phase);
            }
        }
    }

    fn start_run(&mut self) {
        self.state.start_run(&self.tuning);
        self.new_high_score = false;
        log::info!(
            "Run started (high score {}, {} coins)",
            self.progression.high_score,
            self.progression.coins
        );
    }

    /// Run one frame: a tick if playing, then the idle bubble drift
    pub fn frame(&mut self) -> FrameView<'_> {
        let outcome = tick(&mut self.state, &self.tuning, &mut self.rng);
        self.account(&outcome);
        drift_bubbles(&mut self.state.bubbles, &self.state.viewport, &mut self.rng);
        self.view()
    }

    fn account(&mut self, outcome: &TickOutcome) {
        if outcome.food_collected > 0 {
            let reward = outcome.food_collected as u64 * self.tuning.food_reward;
            self.progression.add_coins(reward, &mut self.store);
        }
        if outcome.crash.is_some() {
            self.new_high_score = self
                .progression
                .record_score(self.state.score, &mut self.store);
        }
    }

    /// Snapshot of everything the renderer needs
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            state: &self.state,
            progression: &self.progression,
            tuning: &self.tuning,
            layout: self.layout(),
            new_high_score: self.new_high_score,
            last_purchase: self.last_purchase,
        }
    }
}

/// One row of the shop as displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItemView {
    pub index: usize,
    pub skin: &'static Skin,
    pub unlocked: bool,
    pub selected: bool,
    pub affordable: bool,
}

/// Read-only frame snapshot for the render collaborator
pub struct FrameView<'a> {
    pub state: &'a GameState,
    pub progression: &'a Progression,
    pub tuning: &'a Tuning,
    pub layout: UiLayout,
    pub new_high_score: bool,
    pub last_purchase: Option<PurchaseOutcome>,
}

impl<'a> FrameView<'a> {
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn visible_food(&self) -> impl Iterator<Item = &'a Food> + 'a {
        self.state.visible_food()
    }

    pub fn skin(&self) -> &'static Skin {
        self.progression.skin()
    }

    /// Buttons with their rectangles for the current phase
    pub fn buttons(&self) -> Vec<(Button, crate::Rect)> {
        UiLayout::buttons(self.state.phase)
            .into_iter()
            .map(|b| (b, self.layout.rect(b)))
            .collect()
    }

    pub fn shop_items(&self) -> Vec<ShopItemView> {
        SKINS
            .iter()
            .enumerate()
            .map(|(index, skin)| ShopItemView {
                index,
                skin,
                unlocked: self.progression.is_unlocked(skin.id),
                selected: self.progression.selected == index,
                affordable: self.progression.coins >= skin.cost,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::progression::{COINS_KEY, HIGH_SCORE_KEY, UNLOCKED_KEY};
    use crate::sim::{Crash, Food, Pipe, SequenceRandom};

    type TestSession = Session<MemoryStore, SequenceRandom>;

    fn session_with(store: MemoryStore) -> TestSession {
        // 0.9 never rolls food; 0.5 centres gaps
        let rng = SequenceRandom::new(vec![0.5, 0.9]);
        Session::new(400.0, Tuning::default(), store, rng).unwrap()
    }

    fn session() -> TestSession {
        session_with(MemoryStore::new())
    }

    fn click(session: &mut TestSession, button: Button) {
        let center = session.layout().rect(button);
        let pos = (center.min + center.max) / 2.0;
        session.handle_input(InputEvent::Primary { pos });
    }

    fn crash(session: &mut TestSession) {
        let ground = session.state.viewport.ground_y;
        session.state.player.pos.y = ground;
        let outcome = tick(&mut session.state, &session.tuning, &mut session.rng);
        assert_eq!(outcome.crash, Some(Crash::Ground));
        session.account(&outcome);
    }

    #[test]
    fn test_menu_to_playing() {
        let mut s = session();
        assert_eq!(s.phase(), GamePhase::Menu);

        // A miss does nothing
        s.handle_input(InputEvent::primary(1.0, 1.0));
        assert_eq!(s.phase(), GamePhase::Menu);

        click(&mut s, Button::Start);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.state().score, 0);
        assert!(s.state().pipes.is_empty());
        assert_eq!(s.state().player.velocity, 0.0);
        assert_eq!(s.state().player.pos.y, 360.0);
    }

    #[test]
    fn test_first_frame_scenario() {
        let mut s = session();
        click(&mut s, Button::Start);
        let g = s.tuning().gravity;
        let view = s.frame();
        assert_eq!(view.state.player.velocity, g);
        assert_eq!(view.state.player.pos.y, 360.0 + g);
        assert_eq!(view.state.score, 0);
    }

    #[test]
    fn test_jump_only_while_playing() {
        let mut s = session();
        s.handle_input(InputEvent::Jump);
        assert_eq!(s.state().player.velocity, 0.0);

        click(&mut s, Button::Start);
        s.state.player.velocity = 4.2;
        s.handle_input(InputEvent::Jump);
        assert_eq!(s.state().player.velocity, s.tuning().jump_velocity);

        // Any tap while playing is a jump, even on a button position
        s.state.player.velocity = 1.0;
        click(&mut s, Button::Start);
        assert_eq!(s.state().player.velocity, s.tuning().jump_velocity);
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_game_over_records_high_score() {
        let mut store = MemoryStore::new();
        store.set_u64(HIGH_SCORE_KEY, 5);
        let mut s = session_with(store);

        click(&mut s, Button::Start);
        s.state.score = 3;
        crash(&mut s);
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert_eq!(s.progression().high_score, 5);
        assert!(!s.view().new_high_score);

        click(&mut s, Button::Retry);
        assert_eq!(s.phase(), GamePhase::Playing);
        s.state.score = 8;
        crash(&mut s);
        assert_eq!(s.progression().high_score, 8);
        assert_eq!(s.store().get_u64(HIGH_SCORE_KEY), Some(8));
        assert!(s.view().new_high_score);
    }

    #[test]
    fn test_game_over_freezes_frames() {
        let mut s = session();
        click(&mut s, Button::Start);
        crash(&mut s);
        let y = s.state().player.pos.y;
        let score = s.state().score;
        for _ in 0..30 {
            s.frame();
        }
        assert_eq!(s.state().player.pos.y, y);
        assert_eq!(s.state().score, score);
        // Taps away from buttons do nothing
        s.handle_input(InputEvent::primary(5.0, 5.0));
        assert_eq!(s.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_shop_round_trip() {
        let mut store = MemoryStore::new();
        store.set_u64(COINS_KEY, 9);
        let mut s = session_with(store);

        // No way into the shop from the menu
        s.press(Button::Shop);
        assert_eq!(s.phase(), GamePhase::Menu);

        click(&mut s, Button::Start);
        crash(&mut s);
        click(&mut s, Button::Shop);
        assert_eq!(s.phase(), GamePhase::Shop);

        // 9 coins cannot buy a 10 coin skin
        click(&mut s, Button::ShopItem(1));
        assert_eq!(
            s.view().last_purchase,
            Some(PurchaseOutcome::Rejected {
                cost: 10,
                balance: 9
            })
        );
        assert_eq!(s.progression().coins, 9);
        assert_eq!(s.progression().unlocked, vec!["classic".to_string()]);

        // No direct route from the shop to a run
        s.press(Button::Start);
        s.press(Button::Retry);
        assert_eq!(s.phase(), GamePhase::Shop);

        click(&mut s, Button::Back);
        assert_eq!(s.phase(), GamePhase::Menu);
        assert_eq!(s.view().last_purchase, None);
    }

    #[test]
    fn test_shop_purchase_at_exact_cost() {
        let mut store = MemoryStore::new();
        store.set_u64(COINS_KEY, 10);
        let mut s = session_with(store);
        click(&mut s, Button::Start);
        crash(&mut s);
        click(&mut s, Button::Shop);

        click(&mut s, Button::ShopItem(1));

        assert_eq!(s.progression().coins, 0);
        assert!(s.progression().is_unlocked("grinning"));
        assert_eq!(s.progression().selected, 1);
        assert_eq!(s.view().skin().id, "grinning");
        assert_eq!(
            s.store().get_json::<Vec<String>>(UNLOCKED_KEY),
            Some(vec!["classic".to_string(), "grinning".to_string()])
        );
        let items = s.view().shop_items();
        assert!(items[1].unlocked && items[1].selected);
        assert!(!items[0].selected);
    }

    #[test]
    fn test_food_pays_coins_once() {
        let mut s = session();
        click(&mut s, Button::Start);
        s.state.player.velocity = -s.tuning.gravity;
        let p = s.state.player.pos;
        s.state.food.push(Food {
            pos: p + Vec2::new(15.0, 15.0),
            collected: false,
            variant: 3,
        });

        s.frame();
        assert_eq!(s.progression().coins, 1);
        assert_eq!(s.store().get_u64(COINS_KEY), Some(1));
        assert_eq!(s.state().score, 0);
        assert_eq!(s.view().visible_food().count(), 0);

        s.frame();
        assert_eq!(s.progression().coins, 1);
    }

    #[test]
    fn test_resize_keeps_run_and_rejects_tiny() {
        let mut s = session();
        click(&mut s, Button::Start);
        s.state.pipes.push(Pipe {
            x: 250.0,
            gap_top: 200.0,
        });

        s.handle_input(InputEvent::Resize { width: 500.0 });
        assert_eq!(s.state().viewport.width, 500.0);
        assert_eq!(s.state().pipes.len(), 1);
        assert_eq!(s.phase(), GamePhase::Playing);

        assert!(s.resize(100.0).is_err());
        s.handle_input(InputEvent::Resize { width: 100.0 });
        assert_eq!(s.state().viewport.width, 500.0);
    }

    #[test]
    fn test_bubbles_drift_in_menu() {
        let mut s = session();
        let before: Vec<f32> = s.state().bubbles.iter().map(|b| b.pos.y).collect();
        s.frame();
        let after: Vec<f32> = s.state().bubbles.iter().map(|b| b.pos.y).collect();
        assert_ne!(before, after);
        assert_eq!(s.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_invalid_tuning_rejected_at_startup() {
        let tuning = Tuning {
            pipe_speed: 0.0,
            ..Default::default()
        };
        let rng = SequenceRandom::new(vec![0.5]);
        assert!(Session::new(400.0, tuning, MemoryStore::new(), rng).is_err());
    }
}
