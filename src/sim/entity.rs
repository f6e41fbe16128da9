//! Game entities: each one is a body plus the behavior of its kind
//!
//! The hero owns its controller operations (move, stop, jump) and its stat
//! block. Enemies carry an explicit behavior variant instead of a subtype.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Animation, Body, Bounded, Facing};
use super::collision::probe_below;
use crate::consts::*;
use crate::tile_center;

/// Hero movement state (drives the pose shown by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementState {
    Idle,
    Walking,
    Jumping,
}

impl MovementState {
    /// Number of images in the matching animation sequence
    pub fn frame_count(self) -> usize {
        match self {
            MovementState::Idle | MovementState::Jumping => 1,
            MovementState::Walking => 2,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub body: Body,
    pub facing: Facing,
    /// Set by a successful jump, cleared on landing
    pub jumping: bool,
    pub hearts: u8,
    pub gold_coins: u32,
    pub bronze_coins: u32,
    pub score: u64,
    /// Ticks of invulnerability left after a hit
    pub hurt_cooldown: u32,
    pub animation: Animation,
}

impl Default for Hero {
    fn default() -> Self {
        Self::new()
    }
}

impl Hero {
    /// Fresh hero with full hearts and no score, placed at tile (0, 0)
    pub fn new() -> Self {
        Self {
            body: Body::centered(tile_center(0, 0), Vec2::new(HERO_WIDTH, HERO_HEIGHT)),
            facing: Facing::Right,
            jumping: false,
            hearts: HERO_MAX_HEARTS,
            gold_coins: 0,
            bronze_coins: 0,
            score: 0,
            hurt_cooldown: 0,
            animation: Animation::new(ANIMATION_INTERVAL),
        }
    }

    /// Center the hero on a tile; velocity is left as is
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.body.set_center(tile_center(x, y));
    }

    pub fn move_left(&mut self) {
        self.body.vel.x = -HERO_SPEED;
        self.facing = Facing::Left;
    }

    pub fn move_right(&mut self) {
        self.body.vel.x = HERO_SPEED;
        self.facing = Facing::Right;
    }

    pub fn stop(&mut self) {
        self.body.vel.x = 0.0;
    }

    /// Jump if a platform lies directly beneath; returns whether it did
    pub fn jump<T: Bounded>(&mut self, platforms: &[T]) -> bool {
        if probe_below(&self.body, LEDGE_PROBE, platforms).is_empty() {
            return false;
        }
        self.body.vel.y = -HERO_JUMP_POWER;
        self.jumping = true;
        true
    }

    pub fn is_alive(&self) -> bool {
        self.hearts > 0
    }

    pub fn movement_state(&self) -> MovementState {
        if self.jumping {
            MovementState::Jumping
        } else if self.body.vel.x == 0.0 {
            MovementState::Idle
        } else {
            MovementState::Walking
        }
    }

    /// Take one heart if the cooldown allows; returns whether a heart was lost
    pub fn hurt(&mut self) -> bool {
        if self.hurt_cooldown > 0 {
            return false;
        }
        self.hearts = self.hearts.saturating_sub(1);
        self.hurt_cooldown = HURT_COOLDOWN_TICKS;
        true
    }

    /// Push away from `source` along each axis where the centers differ;
    /// the vertical push never exceeds `terminal_velocity`
    pub fn knock_back_from(&mut self, source: &Body, terminal_velocity: f32) {
        let here = self.body.center();
        let there = source.center();
        if here.x < there.x {
            self.body.vel.x = -KNOCKBACK_SPEED;
        } else if here.x > there.x {
            self.body.vel.x = KNOCKBACK_SPEED;
        }
        let vertical = KNOCKBACK_SPEED.min(terminal_velocity);
        if here.y < there.y {
            self.body.vel.y = -vertical;
        } else if here.y > there.y {
            self.body.vel.y = vertical;
        }
    }

    pub fn tick_cooldown(&mut self) {
        self.hurt_cooldown = self.hurt_cooldown.saturating_sub(1);
    }

    pub fn collect(&mut self, kind: CurrencyKind) {
        match kind {
            CurrencyKind::Gold => self.gold_coins += 1,
            CurrencyKind::Bronze => self.bronze_coins += 1,
        }
        self.score += kind.points();
    }

    pub fn animate(&mut self) {
        self.animation.advance(self.movement_state().frame_count());
    }
}

/// Enemy behavior variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Ground-bound; turns around at walls, world edges and ledges
    Patroller,
    /// Ignores gravity and platforms; turns around at world edges only
    Flyer,
}

impl EnemyKind {
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Patroller => PATROLLER_SPEED,
            EnemyKind::Flyer => FLYER_SPEED,
        }
    }

    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Patroller => Vec2::new(PATROLLER_WIDTH, PATROLLER_HEIGHT),
            EnemyKind::Flyer => Vec2::new(FLYER_WIDTH, FLYER_HEIGHT),
        }
    }

    pub fn animation_interval(self) -> u32 {
        match self {
            EnemyKind::Patroller => ANIMATION_INTERVAL,
            EnemyKind::Flyer => FLYER_ANIMATION_INTERVAL,
        }
    }

    pub fn frame_count(self) -> usize {
        match self {
            EnemyKind::Patroller => 2,
            EnemyKind::Flyer => 5,
        }
    }

    pub fn uses_gravity(self) -> bool {
        matches!(self, EnemyKind::Patroller)
    }
}

/// A hostile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub body: Body,
    pub animation: Animation,
    /// Cleared when the enemy leaves the world; removed at end of pass
    pub alive: bool,
}

impl Enemy {
    /// Spawn centered on a tile, heading left at the kind's speed
    pub fn spawn(id: u32, kind: EnemyKind, x: i32, y: i32) -> Self {
        let mut body = Body::centered(tile_center(x, y), kind.size());
        body.vel.x = -kind.speed();
        Self {
            id,
            kind,
            body,
            animation: Animation::new(kind.animation_interval()),
            alive: true,
        }
    }

    pub fn reverse(&mut self) {
        self.body.vel.x = -self.body.vel.x;
    }

    pub fn facing(&self) -> Facing {
        Facing::from_velocity(self.body.vel.x, Facing::Left)
    }

    pub fn animate(&mut self) {
        self.animation.advance(self.kind.frame_count());
    }
}

impl Bounded for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// Currency kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyKind {
    Gold,
    Bronze,
}

impl CurrencyKind {
    pub fn points(self) -> u64 {
        match self {
            CurrencyKind::Gold => GOLD_POINTS,
            CurrencyKind::Bronze => BRONZE_POINTS,
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub id: u32,
    pub kind: CurrencyKind,
    pub body: Body,
}

impl Currency {
    pub fn spawn(id: u32, kind: CurrencyKind, x: i32, y: i32) -> Self {
        Self {
            id,
            kind,
            body: Body::centered(tile_center(x, y), Vec2::splat(CURRENCY_SIZE)),
        }
    }
}

impl Bounded for Currency {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// Cosmetic platform grouping; all kinds collide the same way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Grass,
    Block,
    Dirt,
}

/// A static tile platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub kind: PlatformKind,
    pub body: Body,
}

impl Platform {
    pub fn spawn(id: u32, kind: PlatformKind, x: i32, y: i32) -> Self {
        Self {
            id,
            kind,
            body: Body::centered(tile_center(x, y), Vec2::splat(GRID_SIZE)),
        }
    }
}

impl Bounded for Platform {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// Goal marker appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalKind {
    /// First marker in level data
    DoorTop,
    Door,
}

/// A level exit marker; touching any marker completes the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: u32,
    pub kind: GoalKind,
    pub body: Body,
}

impl Goal {
    pub fn spawn(id: u32, kind: GoalKind, x: i32, y: i32) -> Self {
        Self {
            id,
            kind,
            body: Body::centered(tile_center(x, y), Vec2::splat(GRID_SIZE)),
        }
    }
}

impl Bounded for Goal {
    fn body(&self) -> &Body {
        &self.body
    }
}
