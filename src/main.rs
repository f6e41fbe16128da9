//! Wiggle Platformer - headless runner
//!
//! Loads the level sequence and lets the demo pilot play it at the fixed tick
//! rate, without a window. Audio cues go to the log.
//!
//! Usage: `wiggle-platformer [settings.json]`

use std::process::ExitCode;

use wiggle_platformer::audio::{LogAudio, dispatch};
use wiggle_platformer::consts::{FPS, SCREEN_WIDTH};
use wiggle_platformer::demo::DemoPilot;
use wiggle_platformer::sim::{GameEvent, GameSession, Stage, tick};
use wiggle_platformer::view::FrameView;
use wiggle_platformer::{LevelSet, Settings};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Wiggle Platformer (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Settings::FILE_NAME.to_string());
    let settings = Settings::load(&settings_path);

    let levels = match LevelSet::load(settings.levels.as_slice()) {
        Ok(levels) => levels,
        Err(e) => {
            log::error!("Cannot start: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = GameSession::new(levels);
    session.show_grid = settings.show_grid;
    let mut audio = LogAudio::from_settings(&settings);
    let mut pilot = DemoPilot::new(settings.demo_seed);

    while !session.should_quit() {
        if settings.max_ticks > 0 && session.time_ticks >= settings.max_ticks {
            log::info!("Tick limit {} reached", settings.max_ticks);
            break;
        }

        let input = pilot.next_input(&session);
        tick(&mut session, &input);

        let events = session.drain_events();
        dispatch(&events, &mut audio);
        let won = events.contains(&GameEvent::StageChanged {
            from: Stage::LevelComplete,
            to: Stage::Win,
        });

        // Once a second, show what a renderer would draw
        if session.time_ticks % u64::from(FPS) == 0 || won {
            let frame = FrameView::capture(&session, SCREEN_WIDTH);
            log::debug!(
                "t={}s {:?} camera={:.0} sprites={} hud={:?}",
                session.time_ticks / u64::from(FPS),
                frame.stage,
                frame.camera_offset,
                frame.sprites.len(),
                frame.hud
            );
        }

        if won {
            break;
        }
    }

    let hero = session.hero();
    log::info!(
        "Finished after {} ticks: stage {:?}, level {}/{}, score {}, gold {}, bronze {}, hearts {}",
        session.time_ticks,
        session.stage,
        session.level_index + 1,
        session.level_count(),
        hero.score,
        hero.gold_coins,
        hero.bronze_coins,
        hero.hearts
    );
    ExitCode::SUCCESS
}
