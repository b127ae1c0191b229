//! Player vertical motion
//!
//! Semi-implicit Euler with a fixed per-tick gravity: velocity first, then
//! position with the new velocity. The only other force is the jump, which
//! replaces the velocity outright.

use super::state::Player;

/// Advance the player by one tick, keeping it below the ceiling
pub fn step(player: &mut Player, gravity: f32) {
    player.velocity += gravity;
    player.pos.y = (player.pos.y + player.velocity).max(0.0);
}

/// Jump: velocity becomes exactly `jump_velocity`
pub fn jump(player: &mut Player, jump_velocity: f32) {
    player.velocity = jump_velocity;
}
