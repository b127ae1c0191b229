//! Flappy Cat - a Flappy Bird style browser game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions)
//! - `session`: Menu/playing/game-over/shop state machine that owns the sim
//! - `progression` / `shop`: Persisted high score, coins and cat skins
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `tuning`: Data-driven game feel constants
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native input events
//! - `ui`: Canvas-space button layout and hit testing

pub mod persistence;
pub mod platform;
pub mod progression;
pub mod renderer;
pub mod session;
pub mod shop;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use progression::Progression;
pub use session::{FrameView, Session};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Canvas height as a multiple of its width (portrait)
    pub const ASPECT_RATIO: f32 = 1.8;
    /// Height of the ground strip at the bottom of the canvas
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Downward acceleration, pixels per tick²
    pub const GRAVITY: f32 = 0.2178;
    /// Velocity set by a jump (negative is up), pixels per tick
    pub const JUMP_VELOCITY: f32 = -5.808;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 100.0;
    pub const PIPE_GAP: f32 = 180.0;
    pub const PIPE_SPEED: f32 = 1.71;
    pub const PIPE_SPAWN_DISTANCE: f32 = 270.0;
    /// Closest the gap may come to the ceiling or the ground
    pub const GAP_MIN_OFFSET: f32 = 80.0;

    /// Player placement, as fractions of the viewport
    pub const PLAYER_X_FRACTION: f32 = 0.2;
    pub const PLAYER_SIZE_FRACTION: f32 = 0.13;
    /// Hitbox shrink per side, as a fraction of the player size
    pub const PLAYER_HITBOX_INSET: f32 = 0.18;

    /// Food defaults
    pub const FOOD_SIZE: f32 = 30.0;
    pub const FOOD_CHANCE: f32 = 0.3;
    pub const FOOD_BAND_FRACTION: f32 = 0.4;
    pub const FOOD_EDGE_BUFFER: f32 = 10.0;
    pub const FOOD_HITBOX_INSET: f32 = 0.1;
    pub const FOOD_REWARD: u64 = 1;
    pub const FOOD_VARIANTS: u8 = 4;

    /// Background bubbles
    pub const BUBBLE_COUNT: usize = 15;
    pub const BUBBLE_MIN_RADIUS: f32 = 5.0;
    pub const BUBBLE_MAX_RADIUS: f32 = 20.0;
    pub const BUBBLE_MIN_SPEED: f32 = 0.2;
    pub const BUBBLE_MAX_SPEED: f32 = 0.7;
}

/// Axis-aligned rectangle in canvas pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        let half = Vec2::new(w, h) / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Shrink by `fraction` of the width/height on every side
    pub fn inset(&self, fraction: f32) -> Self {
        let d = Vec2::new(self.width(), self.height()) * fraction;
        Self {
            min: self.min + d,
            max: self.max - d,
        }
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// Point containment, inclusive on all edges
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
