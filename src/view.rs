//! Read-only frame snapshot for whatever draws the game
//!
//! A renderer never touches the session directly. It asks for a `FrameView`
//! once per frame and draws the sprites it lists, already shifted into screen
//! space by the follow camera.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{
    Body, CurrencyKind, EnemyKind, Facing, GameSession, GoalKind, MovementState, PlatformKind,
    Stage,
};

/// Width of one background image strip
pub const BACKGROUND_WIDTH: f32 = SCREEN_WIDTH;

/// Which image set a sprite is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Hero(MovementState),
    Enemy(EnemyKind),
    Platform(PlatformKind),
    Currency(CurrencyKind),
    Goal(GoalKind),
}

/// One image to draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Top-left corner in screen space
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    /// Index into the kind's image sequence
    pub frame: usize,
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub gold_coins: u32,
    pub bronze_coins: u32,
    pub hearts: u8,
    /// 1-based level number
    pub level: usize,
    pub level_count: usize,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub stage: Stage,
    /// Horizontal camera offset in world units
    pub camera_offset: f32,
    /// Background strip offset in screen units
    pub parallax_offset: f32,
    pub show_grid: bool,
    pub hud: Hud,
    /// Draw order: platforms, goals, coins, enemies, hero
    pub sprites: Vec<Sprite>,
}

impl FrameView {
    /// Snapshot the session for a screen `screen_width` units wide
    pub fn capture(session: &GameSession, screen_width: f32) -> Self {
        let world = &session.world;
        let hero = &world.hero;
        let camera_offset = camera_offset(hero.body.center().x, world.width, screen_width);
        let to_screen = |body: &Body| body.pos - Vec2::new(camera_offset, 0.0);

        let mut sprites = Vec::with_capacity(
            world.platforms.len()
                + world.goals.len()
                + world.currencies.len()
                + world.enemies.len()
                + 1,
        );
        sprites.extend(world.platforms.iter().map(|p| Sprite {
            kind: SpriteKind::Platform(p.kind),
            pos: to_screen(&p.body),
            size: p.body.size,
            facing: Facing::Right,
            frame: 0,
        }));
        sprites.extend(world.goals.iter().map(|g| Sprite {
            kind: SpriteKind::Goal(g.kind),
            pos: to_screen(&g.body),
            size: g.body.size,
            facing: Facing::Right,
            frame: 0,
        }));
        sprites.extend(world.currencies.iter().map(|c| Sprite {
            kind: SpriteKind::Currency(c.kind),
            pos: to_screen(&c.body),
            size: c.body.size,
            facing: Facing::Right,
            frame: 0,
        }));
        sprites.extend(world.enemies.iter().map(|e| Sprite {
            kind: SpriteKind::Enemy(e.kind),
            pos: to_screen(&e.body),
            size: e.body.size,
            facing: e.facing(),
            frame: e.animation.frame(e.kind.frame_count()),
        }));

        let pose = hero.movement_state();
        sprites.push(Sprite {
            kind: SpriteKind::Hero(pose),
            pos: to_screen(&hero.body),
            size: hero.body.size,
            facing: hero.facing,
            frame: hero.animation.frame(pose.frame_count()),
        });

        Self {
            stage: session.stage,
            camera_offset,
            parallax_offset: parallax_offset(camera_offset),
            show_grid: session.show_grid,
            hud: Hud {
                score: hero.score,
                gold_coins: hero.gold_coins,
                bronze_coins: hero.bronze_coins,
                hearts: hero.hearts,
                level: session.level_index + 1,
                level_count: session.level_count(),
            },
            sprites,
        }
    }

    pub fn hero(&self) -> Option<&Sprite> {
        self.sprites
            .iter()
            .find(|s| matches!(s.kind, SpriteKind::Hero(_)))
    }
}

/// Follow camera clamped to the world
pub fn camera_offset(hero_center_x: f32, world_width: f32, screen_width: f32) -> f32 {
    let max_offset = (world_width - screen_width).max(0.0);
    (hero_center_x - screen_width / 2.0).clamp(0.0, max_offset)
}

/// Background scrolls at a fraction of the camera speed and wraps per strip
pub fn parallax_offset(camera_offset: f32) -> f32 {
    -((PARALLAX_FACTOR * camera_offset) % BACKGROUND_WIDTH)
}
