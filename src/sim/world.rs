//! World advance: scrolling pipes and food, drifting bubbles

use glam::Vec2;

use super::random::RandomSource;
use super::state::{Bubble, GameState, Viewport};
use crate::tuning::Tuning;

/// Scroll pipes and food left by one tick of `pipe_speed`
///
/// Retires the leftmost pipe once its right edge is off-screen, scoring one
/// point. Food is dropped once off-screen whether eaten or not. Returns the
/// number of pipes retired.
pub fn scroll(state: &mut GameState, tuning: &Tuning) -> u64 {
    for pipe in &mut state.pipes {
        pipe.x -= tuning.pipe_speed;
    }
    for food in &mut state.food {
        food.pos.x -= tuning.pipe_speed;
    }

    let mut passed = 0;
    if state
        .pipes
        .first()
        .is_some_and(|p| p.right(tuning.pipe_width) < 0.0)
    {
        state.pipes.remove(0);
        state.score += 1;
        passed += 1;
    }

    state.food.retain(|f| f.pos.x + tuning.food_size >= 0.0);
    passed
}

/// Scatter the initial bubble field over the whole viewport
pub fn spawn_bubbles(
    viewport: &Viewport,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Vec<Bubble> {
    (0..tuning.bubble_count)
        .map(|_| Bubble {
            pos: Vec2::new(
                rng.range(0.0, viewport.width),
                rng.range(0.0, viewport.height),
            ),
            radius: rng.range(tuning.bubble_min_radius, tuning.bubble_max_radius),
            speed: rng.range(tuning.bubble_min_speed, tuning.bubble_max_speed),
        })
        .collect()
}

/// Float bubbles upward, wrapping to below the bottom at a new x
pub fn drift_bubbles(bubbles: &mut [Bubble], viewport: &Viewport, rng: &mut impl RandomSource) {
    for bubble in bubbles {
        bubble.pos.y -= bubble.speed;
        if bubble.pos.y + bubble.radius < 0.0 {
            bubble.pos.y = viewport.height + bubble.radius;
            bubble.pos.x = rng.range(0.0, viewport.width);
        }
    }
}
