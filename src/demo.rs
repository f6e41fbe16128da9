//! Demo pilot - plays the game on its own
//!
//! Used by the headless runner and for attract mode. Runs off a seeded PCG so
//! a given seed always produces the same playthrough.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::FPS;
use crate::sim::{GameSession, Stage, TickInput};

/// Chance per grounded tick of a random jump
const JUMP_CHANCE: f64 = 0.04;
/// Ticks spent on the end screens before pressing restart
const RESTART_DELAY: u32 = 2 * FPS;

/// Seeded input generator
#[derive(Debug, Clone)]
pub struct DemoPilot {
    rng: Pcg32,
    last_x: Option<f32>,
    idle_ticks: u32,
}

impl DemoPilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_x: None,
            idle_ticks: 0,
        }
    }

    /// Decide the input for the next tick from what the session shows
    pub fn next_input(&mut self, session: &GameSession) -> TickInput {
        let mut input = TickInput::default();
        match session.stage {
            Stage::Start => {
                self.last_x = None;
                input.any_key = true;
            }
            Stage::Playing => {
                let hero = &session.world.hero;
                let x = hero.body.pos.x;
                // Walk right; hop when stuck against something or at random
                let stuck = self.last_x.is_some_and(|last| x <= last);
                input.right = true;
                input.jump = !hero.jumping && (stuck || self.rng.random_bool(JUMP_CHANCE));
                self.last_x = Some(x);
            }
            Stage::LevelComplete => {
                self.last_x = None;
            }
            Stage::Lose | Stage::Win => {
                self.idle_ticks += 1;
                if self.idle_ticks >= RESTART_DELAY {
                    self.idle_ticks = 0;
                    input.restart = true;
                    log::info!("Demo pilot restarting after {:?}", session.stage);
                }
            }
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelData, LevelSet, TilePos};
    use crate::sim::tick;

    fn level() -> LevelData {
        LevelData {
            width: 30,
            height: 5,
            start: TilePos(0, 2),
            flag_locs: vec![TilePos(29, 2)],
            grass_locs: (0..30).filter(|x| *x != 10).map(|x| TilePos(x, 3)).collect(),
            block_locs: vec![TilePos(5, 2)],
            dirt_locs: Vec::new(),
            gold_locs: vec![TilePos(7, 1)],
            bronze_locs: Vec::new(),
            spikeman_locs: vec![TilePos(15, 2)],
            flyman_locs: vec![TilePos(20, 0)],
            gravity: 0.5,
            terminal_velocity: 12.0,
        }
    }

    fn run(seed: u64, ticks: usize) -> Vec<TickInput> {
        let mut session = GameSession::new(LevelSet::new(vec![level()]).unwrap());
        let mut pilot = DemoPilot::new(seed);
        (0..ticks)
            .map(|_| {
                let input = pilot.next_input(&session);
                tick(&mut session, &input);
                input
            })
            .collect()
    }

    #[test]
    fn test_same_seed_same_run() {
        assert_eq!(run(11, 600), run(11, 600));
    }

    #[test]
    fn test_leaves_start_screen() {
        let mut session = GameSession::new(LevelSet::new(vec![level()]).unwrap());
        let mut pilot = DemoPilot::new(1);
        let input = pilot.next_input(&session);
        assert!(input.starts_game());
        tick(&mut session, &input);
        assert_eq!(session.stage, Stage::Playing);

        let input = pilot.next_input(&session);
        assert!(input.right);
        assert!(!input.left);
    }

    #[test]
    fn test_restarts_after_delay() {
        let mut session = GameSession::new(LevelSet::new(vec![level()]).unwrap());
        session.set_stage(Stage::Lose);
        let mut pilot = DemoPilot::new(3);

        for _ in 0..RESTART_DELAY - 1 {
            assert!(!pilot.next_input(&session).restart);
        }
        assert!(pilot.next_input(&session).restart);
        assert!(!pilot.next_input(&session).restart);
    }

    #[test]
    fn test_jumps_when_stuck() {
        let mut session = GameSession::new(LevelSet::new(vec![level()]).unwrap());
        let mut pilot = DemoPilot::new(5);
        let input = pilot.next_input(&session);
        tick(&mut session, &input);
        assert!(!session.world.hero.jumping);

        // Same position seen twice in a row reads as blocked
        let _ = pilot.next_input(&session);
        assert!(pilot.next_input(&session).jump);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let mut session = GameSession::new(LevelSet::new(vec![level()]).unwrap());
        let mut pilot = DemoPilot::new(5);
        let input = pilot.next_input(&session);
        tick(&mut session, &input);
        session.world.hero.jumping = true;

        for _ in 0..50 {
            assert!(!pilot.next_input(&session).jump);
        }
    }
}
