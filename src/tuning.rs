//! Data-driven game feel constants
//!
//! Every number that shapes how the game plays lives in `Tuning`. Defaults
//! come from `crate::consts`; a JSON override may be stored under
//! `Tuning::STORAGE_KEY`, with missing fields falling back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::KeyValueStore;

/// Configuration precondition violations, rejected at startup
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("{name} must be positive and finite (got {value})")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must be in [{min}, {max}] (got {value})")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("food band of {band} px cannot hold {size} px food with a {buffer} px buffer")]
    FoodBandTooSmall { band: f32, size: f32, buffer: f32 },

    #[error(
        "no room for the gap: ground line {ground} leaves nothing for a {gap} px gap with {min_offset} px margins"
    )]
    NoGapBudget {
        ground: f32,
        gap: f32,
        min_offset: f32,
    },

    #[error("viewport must be non-empty (got {width}x{height})")]
    EmptyViewport { width: f32, height: f32 },
}

/// Game feel parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub gravity: f32,
    pub jump_velocity: f32,
    pub player_x_fraction: f32,
    pub player_size_fraction: f32,
    pub player_hitbox_inset: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_speed: f32,
    pub pipe_spawn_distance: f32,
    pub gap_min_offset: f32,

    // === Food ===
    pub food_size: f32,
    pub food_chance: f32,
    pub food_band_fraction: f32,
    pub food_edge_buffer: f32,
    pub food_hitbox_inset: f32,
    pub food_reward: u64,
    pub food_variants: u8,

    // === Background ===
    pub bubble_count: usize,
    pub bubble_min_radius: f32,
    pub bubble_max_radius: f32,
    pub bubble_min_speed: f32,
    pub bubble_max_speed: f32,

    // === Viewport ===
    pub aspect_ratio: f32,
    pub ground_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            player_x_fraction: PLAYER_X_FRACTION,
            player_size_fraction: PLAYER_SIZE_FRACTION,
            player_hitbox_inset: PLAYER_HITBOX_INSET,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            pipe_spawn_distance: PIPE_SPAWN_DISTANCE,
            gap_min_offset: GAP_MIN_OFFSET,

            food_size: FOOD_SIZE,
            food_chance: FOOD_CHANCE,
            food_band_fraction: FOOD_BAND_FRACTION,
            food_edge_buffer: FOOD_EDGE_BUFFER,
            food_hitbox_inset: FOOD_HITBOX_INSET,
            food_reward: FOOD_REWARD,
            food_variants: FOOD_VARIANTS,

            bubble_count: BUBBLE_COUNT,
            bubble_min_radius: BUBBLE_MIN_RADIUS,
            bubble_max_radius: BUBBLE_MAX_RADIUS,
            bubble_min_speed: BUBBLE_MIN_SPEED,
            bubble_max_speed: BUBBLE_MAX_SPEED,

            aspect_ratio: ASPECT_RATIO,
            ground_height: GROUND_HEIGHT,
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { name, value })
    }
}

fn in_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), TuningError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

impl Tuning {
    /// LocalStorage key for a JSON override
    pub const STORAGE_KEY: &'static str = "flappyCatTuning";

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, String> {
        let tuning: Tuning = serde_json::from_str(json).map_err(|e| e.to_string())?;
        tuning.validate().map_err(|e| e.to_string())?;
        Ok(tuning)
    }

    /// Load the stored override, falling back to defaults when absent or invalid
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override from storage");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring stored tuning override: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Check viewport-independent preconditions
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("gravity", self.gravity)?;
        positive("jump impulse", -self.jump_velocity)?;
        positive("pipe_width", self.pipe_width)?;
        positive("pipe_gap", self.pipe_gap)?;
        positive("pipe_speed", self.pipe_speed)?;
        positive("pipe_spawn_distance", self.pipe_spawn_distance)?;
        positive("food_size", self.food_size)?;
        positive("aspect_ratio", self.aspect_ratio)?;
        in_range("gap_min_offset", self.gap_min_offset, 0.0, f32::MAX)?;
        in_range("ground_height", self.ground_height, 0.0, f32::MAX)?;
        in_range("player_x_fraction", self.player_x_fraction, 0.0, 1.0)?;
        in_range("player_size_fraction", self.player_size_fraction, 0.0, 1.0)?;
        in_range("player_hitbox_inset", self.player_hitbox_inset, 0.0, 0.49)?;
        in_range("food_hitbox_inset", self.food_hitbox_inset, 0.0, 0.49)?;
        in_range("food_chance", self.food_chance, 0.0, 1.0)?;
        in_range("food_band_fraction", self.food_band_fraction, 0.0, 0.5)?;
        in_range("food_edge_buffer", self.food_edge_buffer, 0.0, f32::MAX)?;
        in_range(
            "food_variants",
            self.food_variants as f32,
            1.0,
            u8::MAX as f32,
        )?;
        in_range(
            "bubble_min_radius",
            self.bubble_min_radius,
            0.0,
            self.bubble_max_radius,
        )?;
        in_range(
            "bubble_min_speed",
            self.bubble_min_speed,
            0.0,
            self.bubble_max_speed,
        )?;

        let band = self.pipe_gap * self.food_band_fraction;
        if band < self.food_size + self.food_edge_buffer {
            return Err(TuningError::FoodBandTooSmall {
                band,
                size: self.food_size,
                buffer: self.food_edge_buffer,
            });
        }
        Ok(())
    }

    /// Check that a gap fits between ceiling and a ground line at `ground_y`
    pub fn check_gap_budget(&self, ground_y: f32) -> Result<(), TuningError> {
        if self.gap_top_max(ground_y) > self.gap_min_offset {
            Ok(())
        } else {
            Err(TuningError::NoGapBudget {
                ground: ground_y,
                gap: self.pipe_gap,
                min_offset: self.gap_min_offset,
            })
        }
    }

    /// Largest gap-top that keeps the gap clear of the ground margin
    pub fn gap_top_max(&self, ground_y: f32) -> f32 {
        ground_y - self.pipe_gap - self.gap_min_offset
    }
}
