//! Fixed timestep simulation tick
//!
//! Core game loop step: apply input, run the world (Playing only), then
//! evaluate stage transitions.

use super::state::{GameEvent, GameSession, Stage};
use crate::audio::{MusicCue, SoundCue};

/// Input signals for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left is held (wins over right)
    pub left: bool,
    /// Move right is held
    pub right: bool,
    /// Jump was pressed this tick
    pub jump: bool,
    /// Restart was pressed this tick
    pub restart: bool,
    /// Debug grid toggle was pressed this tick
    pub toggle_grid: bool,
    /// Some other key was pressed this tick
    pub any_key: bool,
    /// Window close / quit key
    pub quit: bool,
}

impl TickInput {
    /// Whether this input should leave the Start screen
    pub fn starts_game(&self) -> bool {
        self.any_key || self.jump || self.restart
    }
}

/// Advance the session by one fixed tick
pub fn tick(session: &mut GameSession, input: &TickInput) {
    if input.quit {
        session.request_quit();
    }
    if session.should_quit() {
        return;
    }

    if input.toggle_grid {
        session.show_grid = !session.show_grid;
    }

    session.time_ticks += 1;

    match session.stage {
        Stage::Start => {
            if input.starts_game() {
                session.set_stage(Stage::Playing);
                session.emit(GameEvent::Music(MusicCue::Theme));
            }
        }

        Stage::Playing => {
            if steer_hero(session, input) {
                session.emit(GameEvent::Sound(SoundCue::Jump));
            }

            let report = session.world.step();
            for _ in &report.pickups {
                session.emit(GameEvent::Sound(SoundCue::Pickup));
            }
            if report.hurt {
                session.emit(GameEvent::Sound(SoundCue::Hurt));
            }

            if !session.world.hero.is_alive() {
                session.set_stage(Stage::Lose);
                session.emit(GameEvent::Music(MusicCue::Stop));
                session.emit(GameEvent::Sound(SoundCue::Lose));
            } else if report.reached_goal {
                session.complete_level();
            }
        }

        Stage::LevelComplete => {
            session.countdown = session.countdown.saturating_sub(1);
            if session.countdown == 0 {
                if session.is_last_level() {
                    session.set_stage(Stage::Win);
                    session.emit(GameEvent::Sound(SoundCue::Win));
                } else {
                    let next = session.level_index + 1;
                    session.load_level(next);
                    session.set_stage(Stage::Playing);
                    session.emit(GameEvent::Music(MusicCue::Theme));
                }
            }
        }

        Stage::Lose | Stage::Win => {
            if input.restart {
                session.restart();
            }
        }
    }
}

/// Apply jump and held direction to the hero; returns whether it jumped
fn steer_hero(session: &mut GameSession, input: &TickInput) -> bool {
    let world = &mut session.world;
    let jumped = input.jump && world.hero.jump(&world.platforms);
    if input.left {
        world.hero.move_left();
    } else if input.right {
        world.hero.move_right();
    } else {
        world.hero.stop();
    }
    jumped
}
