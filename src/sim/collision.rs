//! Collision detection and scoring events
//!
//! Both the cat and the food use inset hitboxes, so a graze against the
//! corner of a glyph does not count.

use serde::{Deserialize, Serialize};

use super::state::{Food, Pipe, Player, Viewport};
use crate::Rect;
use crate::tuning::Tuning;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crash {
    Ground,
    /// Index into the pipe list at the time of the crash
    Pipe(usize),
}

/// Whether `hitbox` strikes the pipe body above or below its gap
pub fn hits_pipe(hitbox: &Rect, pipe: &Pipe, tuning: &Tuning) -> bool {
    let in_column = hitbox.right() > pipe.x && hitbox.left() < pipe.right(tuning.pipe_width);
    in_column
        && (hitbox.top() < pipe.gap_top || hitbox.bottom() > pipe.gap_bottom(tuning.pipe_gap))
}

/// First terminal condition for this tick, ground before pipes
pub fn check_crash(
    player: &Player,
    pipes: &[Pipe],
    viewport: &Viewport,
    tuning: &Tuning,
) -> Option<Crash> {
    let hitbox = player.hitbox(tuning.player_hitbox_inset);

    if hitbox.bottom() > viewport.ground_y {
        return Some(Crash::Ground);
    }

    pipes
        .iter()
        .position(|pipe| hits_pipe(&hitbox, pipe, tuning))
        .map(Crash::Pipe)
}

/// Mark every uneaten food touching the player as collected
///
/// Returns how many were collected this call. Already-collected food is
/// skipped, so each item counts once.
pub fn collect_food(player: &Player, food: &mut [Food], tuning: &Tuning) -> u32 {
    let hitbox = player.hitbox(tuning.player_hitbox_inset);
    let mut eaten = 0;
    for item in food.iter_mut().filter(|f| !f.collected) {
        let food_box = item.bounds(tuning.food_size).inset(tuning.food_hitbox_inset);
        if hitbox.overlaps(&food_box) {
            item.collected = true;
            eaten += 1;
        }
    }
    eaten
}
