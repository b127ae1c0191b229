//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Randomness only through `RandomSource`
//! - Stable iteration order (creation order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod physics;
pub mod random;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{Crash, check_crash, collect_food};
pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use state::{Bubble, Food, GamePhase, GameState, Pipe, Player, Viewport};
pub use tick::{TickOutcome, tick};
