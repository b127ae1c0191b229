//! Pipe and food spawning
//!
//! Spawning is driven by distance, not time: a new pipe enters at the right
//! edge once the newest pipe has scrolled `pipe_spawn_distance` into view.

use glam::Vec2;

use super::random::RandomSource;
use super::state::{Food, GameState, Pipe, Viewport};
use crate::tuning::Tuning;

/// Whether the newest pipe has travelled far enough for another
pub fn pipe_due(pipes: &[Pipe], viewport: &Viewport, tuning: &Tuning) -> bool {
    pipes
        .last()
        .is_none_or(|p| p.x < viewport.width - tuning.pipe_spawn_distance)
}

/// Gap-top drawn uniformly from [min offset, ground - gap - min offset)
pub fn sample_gap_top(rng: &mut impl RandomSource, viewport: &Viewport, tuning: &Tuning) -> f32 {
    rng.range(tuning.gap_min_offset, tuning.gap_top_max(viewport.ground_y))
}

/// Maybe place food inside `pipe`'s gap
///
/// The food lands in the upper or lower `food_band_fraction` of the gap with
/// equal odds, kept `food_edge_buffer` away from the pipe lip.
pub fn place_food(rng: &mut impl RandomSource, pipe: &Pipe, tuning: &Tuning) -> Option<Food> {
    if !rng.chance(tuning.food_chance) {
        return None;
    }

    let band = tuning.pipe_gap * tuning.food_band_fraction;
    let y = if rng.chance(0.5) {
        rng.range(
            pipe.gap_top + tuning.food_edge_buffer,
            pipe.gap_top + band - tuning.food_size,
        )
    } else {
        let gap_bottom = pipe.gap_bottom(tuning.pipe_gap);
        rng.range(
            gap_bottom - band,
            gap_bottom - tuning.food_edge_buffer - tuning.food_size,
        )
    };
    let variant = rng.index(tuning.food_variants as usize) as u8;

    Some(Food {
        pos: Vec2::new(pipe.x, y),
        collected: false,
        variant,
    })
}

/// Spawn a pipe (and maybe food) at the right edge if one is due
///
/// Returns true if a pipe was created.
pub fn spawn_if_due(state: &mut GameState, tuning: &Tuning, rng: &mut impl RandomSource) -> bool {
    if !pipe_due(&state.pipes, &state.viewport, tuning) {
        return false;
    }

    let pipe = Pipe {
        x: state.viewport.width,
        gap_top: sample_gap_top(rng, &state.viewport, tuning),
    };
    state.pipes.push(pipe);

    match place_food(rng, &pipe, tuning) {
        Some(food) => {
            log::debug!(
                "Spawned pipe gap_top={:.1} with food at y={:.1}",
                pipe.gap_top,
                food.pos.y
            );
            state.food.push(food);
        }
        None => log::debug!("Spawned pipe gap_top={:.1}", pipe.gap_top),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::{SeededRandom, SequenceRandom};
    use proptest::prelude::*;

    fn setup(rolls: Vec<f32>) -> (GameState, Tuning, SequenceRandom) {
        let tuning = Tuning::default();
        let viewport = Viewport::new(400.0, &tuning).unwrap();
        let mut rng = SequenceRandom::new(vec![0.5]);
        let mut state = GameState::new(viewport, &tuning, &mut rng);
        state.start_run(&tuning);
        (state, tuning, SequenceRandom::new(rolls))
    }

    #[test]
    fn test_first_pipe_spawns_immediately() {
        // gap roll, then food roll that fails
        let (mut state, tuning, mut rng) = setup(vec![0.0, 0.99]);
        assert!(spawn_if_due(&mut state, &tuning, &mut rng));
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, 400.0);
        assert_eq!(state.pipes[0].gap_top, tuning.gap_min_offset);
        assert!(state.food.is_empty());

        // Not due until the pipe has scrolled past width - spawn distance
        assert!(!spawn_if_due(&mut state, &tuning, &mut rng));
        state.pipes[0].x = 130.0;
        assert!(!spawn_if_due(&mut state, &tuning, &mut rng));
        state.pipes[0].x = 129.9;
        assert!(spawn_if_due(&mut state, &tuning, &mut rng));
        assert_eq!(state.pipes.len(), 2);
    }

    #[test]
    fn test_food_in_upper_band() {
        // gap 0.5, food yes, upper side, y 0.0, variant 0.6
        let (mut state, tuning, mut rng) = setup(vec![0.5, 0.1, 0.2, 0.0, 0.6]);
        spawn_if_due(&mut state, &tuning, &mut rng);
        let pipe = state.pipes[0];
        let food = state.food[0];
        assert_eq!(food.pos.x, pipe.x);
        assert_eq!(food.pos.y, pipe.gap_top + tuning.food_edge_buffer);
        assert_eq!(food.variant, 2);
        assert!(!food.collected);
    }

    #[test]
    fn test_food_in_lower_band() {
        // gap 0.5, food yes, lower side, y at the very top of the band
        let (mut state, tuning, mut rng) = setup(vec![0.5, 0.1, 0.7, 0.0, 0.0]);
        spawn_if_due(&mut state, &tuning, &mut rng);
        let pipe = state.pipes[0];
        let food = state.food[0];
        let band = tuning.pipe_gap * tuning.food_band_fraction;
        assert!((food.pos.y - (pipe.gap_bottom(tuning.pipe_gap) - band)).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn gap_always_fits(seed in any::<u64>(), width in 300.0f32..1200.0) {
            let tuning = Tuning::default();
            let viewport = Viewport::new(width, &tuning).unwrap();
            let mut rng = SeededRandom::new(seed);
            for _ in 0..50 {
                let gap_top = sample_gap_top(&mut rng, &viewport, &tuning);
                prop_assert!(gap_top >= tuning.gap_min_offset);
                prop_assert!(gap_top + tuning.pipe_gap <= viewport.ground_y - tuning.gap_min_offset + 1e-3);
            }
        }

        #[test]
        fn food_stays_inside_gap(seed in any::<u64>()) {
            let tuning = Tuning { food_chance: 1.0, ..Default::default() };
            let viewport = Viewport::new(400.0, &tuning).unwrap();
            let mut rng = SeededRandom::new(seed);
            for _ in 0..50 {
                let pipe = Pipe { x: 400.0, gap_top: sample_gap_top(&mut rng, &viewport, &tuning) };
                let food = place_food(&mut rng, &pipe, &tuning).unwrap();
                let top = food.pos.y;
                let bottom = top + tuning.food_size;
                let band = tuning.pipe_gap * tuning.food_band_fraction;
                let in_upper = top >= pipe.gap_top + tuning.food_edge_buffer - 1e-3
                    && bottom <= pipe.gap_top + band + 1e-3;
                let in_lower = top >= pipe.gap_bottom(tuning.pipe_gap) - band - 1e-3
                    && bottom <= pipe.gap_bottom(tuning.pipe_gap) - tuning.food_edge_buffer + 1e-3;
                prop_assert!(in_upper || in_lower);
                prop_assert!((food.variant as usize) < tuning.food_variants as usize);
            }
        }
    }
}
