//! Axis-aligned body primitive shared by every game object
//!
//! Coordinates follow screen convention: +x is right, +y is down. A body is
//! stored as its top-left corner plus size, so edge queries are exact for the
//! integral and half-integral values the simulation produces.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Smallest extent a body may have on either axis
const MIN_EXTENT: f32 = 1.0;

/// Axis-aligned rectangle with a velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (always positive)
    pub size: Vec2,
    /// Velocity in world units per tick
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        debug_assert!(
            size.x > 0.0 && size.y > 0.0,
            "body size must be positive, got {size}"
        );
        Self {
            pos,
            size: size.max(Vec2::splat(MIN_EXTENT)),
            vel: Vec2::ZERO,
        }
    }

    /// Body of the given size centered on a point
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x;
    }

    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    /// Move so the center lands on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size / 2.0;
    }

    /// Strict overlap test; touching edges do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Copy of this body shifted by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            pos: self.pos + offset,
            ..*self
        }
    }

    /// Add gravity to vertical velocity, clamped to the terminal speed
    pub fn apply_gravity(&mut self, gravity: f32, terminal_velocity: f32) {
        self.vel.y = (self.vel.y + gravity).clamp(-terminal_velocity, terminal_velocity);
    }
}

/// Anything that occupies a rectangle in the world
pub trait Bounded {
    fn body(&self) -> &Body;
}

impl Bounded for Body {
    fn body(&self) -> &Body {
        self
    }
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal velocity (zero keeps `fallback`)
    pub fn from_velocity(vx: f32, fallback: Facing) -> Self {
        if vx > 0.0 {
            Facing::Right
        } else if vx < 0.0 {
            Facing::Left
        } else {
            fallback
        }
    }
}

/// Tick-driven frame counter for cosmetic image cycling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    ticks: u32,
    frame: usize,
    interval: u32,
}

impl Animation {
    pub fn new(interval: u32) -> Self {
        Self {
            ticks: 0,
            frame: 0,
            interval: interval.max(1),
        }
    }

    /// Count one tick; every `interval` ticks move to the next frame of a
    /// sequence `frame_count` long, wrapping to 0
    pub fn advance(&mut self, frame_count: usize) {
        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % self.interval == 0 {
            self.frame += 1;
            if self.frame >= frame_count {
                self.frame = 0;
            }
        }
    }

    /// Current frame, folded into a sequence `frame_count` long
    pub fn frame(&self, frame_count: usize) -> usize {
        if frame_count == 0 {
            0
        } else {
            self.frame % frame_count
        }
    }
}
