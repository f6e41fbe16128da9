//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (velocities are world units per tick)
//! - Entities are visited in level-load order, which is also ascending ID order
//! - Collections grow only at level load and shrink only during a tick
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;
pub mod world;

pub use body::{Animation, Body, Bounded, Facing};
pub use collision::{Axis, AxisMove, overlapping, probe_below, resolve_axis_move};
pub use entity::{
    Currency, CurrencyKind, Enemy, EnemyKind, Goal, GoalKind, Hero, MovementState, Platform,
    PlatformKind,
};
pub use state::{GameEvent, GameSession, Stage};
pub use tick::{TickInput, tick};
pub use world::{HeroReport, World};
