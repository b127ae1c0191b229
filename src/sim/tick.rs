//! Fixed-step simulation tick
//!
//! One tick = one displayed frame. Order within a tick is fixed: player
//! physics, pipe spawn and scroll, then collision checks.

use super::collision::{Crash, check_crash, collect_food};
use super::physics;
use super::random::RandomSource;
use super::spawn::spawn_if_due;
use super::state::{GamePhase, GameState};
use super::world::scroll;
use crate::tuning::Tuning;

/// Events produced by one tick, for the session to account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Pipes retired off the left edge (each scored a point)
    pub pipes_passed: u64,
    /// Food items eaten this tick
    pub food_collected: u32,
    /// Set when the run ended this tick
    pub crash: Option<Crash>,
}

/// Advance the game state by one tick
///
/// Does nothing outside `Playing`. A crash moves the state to `GameOver`;
/// persisting the high score is the caller's job.
pub fn tick(state: &mut GameState, tuning: &Tuning, rng: &mut impl RandomSource) -> TickOutcome {
    if state.phase != GamePhase::Playing {
        return TickOutcome::default();
    }

    state.time_ticks += 1;

    physics::step(&mut state.player, tuning.gravity);

    spawn_if_due(state, tuning, rng);
    let pipes_passed = scroll(state, tuning);

    let crash = check_crash(&state.player, &state.pipes, &state.viewport, tuning);
    let food_collected = collect_food(&state.player, &mut state.food, tuning);

    if let Some(crash) = crash {
        log::info!(
            "Run over after {} ticks: {:?}, score {}",
            state.time_ticks,
            crash,
            state.score
        );
        state.phase = GamePhase::GameOver;
    }

    TickOutcome {
        pipes_passed,
        food_collected,
        crash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::{SeededRandom, SequenceRandom};
    use crate::sim::state::{Food, Pipe, Viewport};
    use glam::Vec2;

    fn playing(rng: &mut impl RandomSource) -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let viewport = Viewport::new(400.0, &tuning).unwrap();
        let mut state = GameState::new(viewport, &tuning, rng);
        state.start_run(&tuning);
        (state, tuning)
    }

    #[test]
    fn test_first_tick_from_start() {
        let mut rng = SequenceRandom::new(vec![0.5, 0.9]);
        let (mut state, tuning) = playing(&mut rng);
        let mid = state.viewport.height / 2.0;

        let outcome = tick(&mut state, &tuning, &mut rng);

        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(state.score, 0);
        assert_eq!(state.player.velocity, tuning.gravity);
        assert_eq!(state.player.pos.y, mid + tuning.gravity);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, 400.0 - tuning.pipe_speed);
    }

    #[test]
    fn test_ground_hit_freezes_run() {
        let mut rng = SequenceRandom::new(vec![0.5, 0.9]);
        let (mut state, tuning) = playing(&mut rng);
        let size = state.player.size;
        // Hitbox bottom at ground + 1, with velocity cancelling this tick's gravity
        state.player.pos.y =
            state.viewport.ground_y + 1.0 - size * (1.0 - tuning.player_hitbox_inset);
        state.player.velocity = -tuning.gravity;

        let outcome = tick(&mut state, &tuning, &mut rng);
        assert_eq!(outcome.crash, Some(Crash::Ground));
        assert_eq!(state.phase, GamePhase::GameOver);

        let frozen = state.clone();
        for _ in 0..10 {
            assert_eq!(tick(&mut state, &tuning, &mut rng), TickOutcome::default());
        }
        assert_eq!(state.player.pos, frozen.player.pos);
        assert_eq!(state.player.velocity, frozen.player.velocity);
        assert_eq!(state.pipes, frozen.pipes);
        assert_eq!(state.time_ticks, frozen.time_ticks);
    }

    #[test]
    fn test_menu_does_not_tick() {
        let tuning = Tuning::default();
        let viewport = Viewport::new(400.0, &tuning).unwrap();
        let mut rng = SequenceRandom::new(vec![0.5]);
        let mut state = GameState::new(viewport, &tuning, &mut rng);
        let y = state.player.pos.y;
        tick(&mut state, &tuning, &mut rng);
        assert_eq!(state.player.pos.y, y);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_food_pays_but_never_scores() {
        let mut rng = SequenceRandom::new(vec![0.5, 0.9]);
        let (mut state, tuning) = playing(&mut rng);
        state.player.velocity = -tuning.gravity;
        let p = state.player.pos;
        state.food.push(Food {
            pos: p + Vec2::new(20.0, 20.0),
            collected: false,
            variant: 0,
        });

        let outcome = tick(&mut state, &tuning, &mut rng);
        assert_eq!(outcome.food_collected, 1);
        assert_eq!(outcome.pipes_passed, 0);
        assert_eq!(state.score, 0);

        let outcome = tick(&mut state, &tuning, &mut rng);
        assert_eq!(outcome.food_collected, 0);
    }

    #[test]
    fn test_passing_pipe_scores_one() {
        let mut rng = SequenceRandom::new(vec![0.5, 0.9]);
        let (mut state, tuning) = playing(&mut rng);
        // A pipe about to leave, plus a recent one so no spawn happens
        state.pipes.push(Pipe {
            x: -tuning.pipe_width + 1.0,
            gap_top: 100.0,
        });
        state.pipes.push(Pipe {
            x: 350.0,
            gap_top: 300.0,
        });
        state.player.velocity = -tuning.gravity;

        let outcome = tick(&mut state, &tuning, &mut rng);
        assert_eq!(outcome.pipes_passed, 1);
        assert_eq!(outcome.crash, None);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = SeededRandom::new(99999);
        let mut rng2 = SeededRandom::new(99999);
        let (mut state1, tuning) = playing(&mut rng1);
        let (mut state2, _) = playing(&mut rng2);

        for i in 0..600 {
            if i % 25 == 0 {
                physics::jump(&mut state1.player, tuning.jump_velocity);
                physics::jump(&mut state2.player, tuning.jump_velocity);
            }
            assert_eq!(
                tick(&mut state1, &tuning, &mut rng1),
                tick(&mut state2, &tuning, &mut rng2)
            );
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.pipes, state2.pipes);
        assert_eq!(state1.food, state2.food);
        assert_eq!(state1.score, state2.score);
    }
}
