//! Game state and core simulation types
//!
//! Coordinates are canvas pixels with the origin at the top-left corner and y
//! growing downward. All speeds are per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::world::spawn_bubbles;
use crate::Rect;
use crate::tuning::{Tuning, TuningError};

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for Start
    Menu,
    /// Active run
    Playing,
    /// Run ended, score frozen
    GameOver,
    /// Skin shop
    Shop,
}

/// Viewport-derived dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Top of the ground strip
    pub ground_y: f32,
}

impl Viewport {
    /// Build a portrait viewport for a canvas `width` pixels wide
    pub fn new(width: f32, tuning: &Tuning) -> Result<Self, TuningError> {
        let height = width * tuning.aspect_ratio;
        if !(width.is_finite() && width > 0.0 && height > 0.0) {
            return Err(TuningError::EmptyViewport { width, height });
        }
        let ground_y = height - tuning.ground_height;
        tuning.check_gap_budget(ground_y)?;
        Ok(Self {
            width,
            height,
            ground_y,
        })
    }
}

/// The player's cat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left of the nominal bounding square
    pub pos: Vec2,
    /// Vertical velocity (negative is up)
    pub velocity: f32,
    /// Side of the nominal bounding square
    pub size: f32,
}

impl Player {
    /// Fresh player for the start of a run
    pub fn spawn(viewport: &Viewport, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width * tuning.player_x_fraction,
                viewport.height / 2.0,
            ),
            velocity: 0.0,
            size: Self::size_for(viewport, tuning),
        }
    }

    pub fn size_for(viewport: &Viewport, tuning: &Tuning) -> f32 {
        viewport.width * tuning.player_size_fraction
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Collision box, shrunk by `inset` of the size on every side
    pub fn hitbox(&self, inset: f32) -> Rect {
        self.bounds().inset(inset)
    }
}

/// A pipe pair with a passable gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Bottom of the upper pipe (top of the gap)
    pub gap_top: f32,
}

impl Pipe {
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }

    pub fn gap_bottom(&self, gap: f32) -> f32 {
        self.gap_top + gap
    }
}

/// A collectible food item inside a pipe gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Food {
    /// Top-left of the food square
    pub pos: Vec2,
    pub collected: bool,
    /// Index into the food glyph set
    pub variant: u8,
}

impl Food {
    pub fn bounds(&self, size: f32) -> Rect {
        Rect::new(self.pos.x, self.pos.y, size, size)
    }
}

/// Decorative background bubble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub pos: Vec2,
    pub radius: f32,
    /// Upward speed
    pub speed: f32,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Pipes passed this run
    pub score: u64,
    pub viewport: Viewport,
    pub player: Player,
    /// Pipes in creation order (leftmost first)
    pub pipes: Vec<Pipe>,
    /// Food in creation order; collected food stays until it scrolls away
    pub food: Vec<Food>,
    pub bubbles: Vec<Bubble>,
    /// Simulation ticks this run
    pub time_ticks: u64,
}

impl GameState {
    /// Start at the menu with a fresh bubble field
    pub fn new(viewport: Viewport, tuning: &Tuning, rng: &mut impl RandomSource) -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            viewport,
            player: Player::spawn(&viewport, tuning),
            pipes: Vec::new(),
            food: Vec::new(),
            bubbles: spawn_bubbles(&viewport, tuning, rng),
            time_ticks: 0,
        }
    }

    /// Reset player, pipes, food and score, and enter Playing
    pub fn start_run(&mut self, tuning: &Tuning) {
        self.player = Player::spawn(&self.viewport, tuning);
        self.pipes.clear();
        self.food.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }

    /// Swap in a new viewport without touching the run in progress
    pub fn resize(&mut self, viewport: Viewport, tuning: &Tuning) {
        self.viewport = viewport;
        self.player.size = Player::size_for(&viewport, tuning);
    }

    /// Food still on screen and not yet eaten
    pub fn visible_food(&self) -> impl Iterator<Item = &Food> {
        self.food.iter().filter(|f| !f.collected)
    }
}
