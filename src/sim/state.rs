//! Game session state
//!
//! The session owns the world and the level sequence, and tracks which stage
//! of the game is showing. Nothing here is global; every update takes the
//! session by reference.

use serde::{Deserialize, Serialize};

use super::entity::Hero;
use super::world::World;
use crate::audio::{MusicCue, SoundCue};
use crate::consts::*;
use crate::level::LevelSet;

/// Current stage of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Title screen, waiting for any key
    Start,
    /// Active gameplay
    Playing,
    /// Goal reached; counting down to the next level
    LevelComplete,
    /// Out of hearts
    Lose,
    /// Final level cleared
    Win,
}

/// Side effects emitted during a tick, drained by the host loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
    Music(MusicCue),
    StageChanged { from: Stage, to: Stage },
    LevelLoaded { index: usize },
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Current stage
    pub stage: Stage,
    /// Index into the level sequence (0-based)
    pub level_index: usize,
    /// The current level's world, including the hero
    pub world: World,
    /// Ticks left before leaving LevelComplete
    pub countdown: u32,
    /// Whether the completion bonus for this level has been paid
    pub bonus_awarded: bool,
    /// Debug grid overlay requested by the player
    pub show_grid: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    quit_requested: bool,
    levels: LevelSet,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// New session on the Start screen with level 0 loaded
    pub fn new(levels: LevelSet) -> Self {
        let world = World::from_level(levels.first(), Hero::new());
        let mut session = Self {
            stage: Stage::Start,
            level_index: 0,
            world,
            countdown: 0,
            bonus_awarded: false,
            show_grid: false,
            time_ticks: 0,
            quit_requested: false,
            levels,
            events: Vec::new(),
        };
        session.emit(GameEvent::LevelLoaded { index: 0 });
        session.emit(GameEvent::Music(MusicCue::Intro));
        session
    }

    pub fn hero(&self) -> &Hero {
        &self.world.hero
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= self.levels.len()
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            log::info!("Quit requested");
        }
        self.quit_requested = true;
    }

    /// Queue an event for the host loop
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch stage, logging and emitting the change
    pub fn set_stage(&mut self, to: Stage) {
        let from = self.stage;
        if from == to {
            return;
        }
        log::info!("Stage {:?} -> {:?} (level {})", from, to, self.level_index + 1);
        self.stage = to;
        self.emit(GameEvent::StageChanged { from, to });
    }

    /// Enter LevelComplete: start the countdown and pay the bonus once
    pub fn complete_level(&mut self) {
        self.countdown = LEVEL_COMPLETE_TICKS;
        if !self.bonus_awarded {
            self.world.hero.score += LEVEL_BONUS;
            self.bonus_awarded = true;
        }
        self.set_stage(Stage::LevelComplete);
        self.emit(GameEvent::Music(MusicCue::Stop));
        self.emit(GameEvent::Sound(SoundCue::LevelComplete));
    }

    /// Rebuild the world for `index`, carrying the hero over
    pub fn load_level(&mut self, index: usize) {
        let Some(level) = self.levels.get(index) else {
            log::warn!("No level at index {}, keeping current world", index);
            return;
        };
        let hero = self.world.hero.clone();
        self.world = World::from_level(level, hero);
        self.level_index = index;
        self.bonus_awarded = false;
        self.countdown = 0;
        log::info!("Loaded level {}/{}", index + 1, self.levels.len());
        self.emit(GameEvent::LevelLoaded { index });
    }

    /// Reset hero stats, reload level 0 and go back to the Start screen
    pub fn restart(&mut self) {
        self.world.hero = Hero::new();
        self.load_level(0);
        self.set_stage(Stage::Start);
        self.emit(GameEvent::Music(MusicCue::Intro));
    }
}
