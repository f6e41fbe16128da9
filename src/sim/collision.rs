//! Collision detection and response for axis-aligned bodies
//!
//! Movement is resolved one axis at a time: apply the displacement, find every
//! obstacle the body now overlaps, and clamp the leading edge against each of
//! them. Doing x before y is a simplification; a fast body clipping a corner
//! can be pushed out along the wrong axis. That artifact is accepted.

use glam::Vec2;

use super::body::{Body, Bounded};

/// Movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Result of moving a body along one axis
#[derive(Debug, Clone)]
pub struct AxisMove {
    /// Body after displacement and clamping
    pub body: Body,
    /// Indices of obstacles the displaced body overlapped
    pub hits: Vec<usize>,
}

impl AxisMove {
    /// Whether any obstacle stopped the move
    pub fn collided(&self) -> bool {
        !self.hits.is_empty()
    }
}

/// Displace `body` by `delta` along `axis` and resolve against `obstacles`
///
/// Moving right clamps `right = obstacle.left`, moving left clamps
/// `left = obstacle.right`; vertically, moving down clamps
/// `bottom = obstacle.top` and moving up clamps `top = obstacle.bottom`.
/// A zero delta reports overlaps without clamping. Velocity is untouched;
/// callers decide what a hit means for their entity.
pub fn resolve_axis_move<T: Bounded>(
    mut body: Body,
    axis: Axis,
    delta: f32,
    obstacles: &[T],
) -> AxisMove {
    match axis {
        Axis::Horizontal => body.pos.x += delta,
        Axis::Vertical => body.pos.y += delta,
    }

    let hits = overlapping(&body, obstacles);
    for &i in &hits {
        let obstacle = obstacles[i].body();
        match axis {
            Axis::Horizontal if delta > 0.0 => body.set_right(obstacle.left()),
            Axis::Horizontal if delta < 0.0 => body.set_left(obstacle.right()),
            Axis::Vertical if delta > 0.0 => body.set_bottom(obstacle.top()),
            Axis::Vertical if delta < 0.0 => body.set_top(obstacle.bottom()),
            _ => {}
        }
    }

    AxisMove { body, hits }
}

/// Indices of every item whose body overlaps `body`, in slice order
pub fn overlapping<T: Bounded>(body: &Body, items: &[T]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| body.overlaps(item.body()))
        .map(|(i, _)| i)
        .collect()
}

/// Whether `body` overlaps any item
pub fn overlaps_any<T: Bounded>(body: &Body, items: &[T]) -> bool {
    items.iter().any(|item| body.overlaps(item.body()))
}

/// Obstacles found by nudging `body` down by `distance`
///
/// Used both for jump eligibility (anything directly beneath) and for ledge
/// detection (which platforms support the leading edge).
pub fn probe_below<'a, T: Bounded>(body: &Body, distance: f32, obstacles: &'a [T]) -> Vec<&'a T> {
    let probe = body.translated(Vec2::new(0.0, distance));
    obstacles
        .iter()
        .filter(|obstacle| probe.overlaps(obstacle.body()))
        .collect()
}

/// Whether a body moving with horizontal velocity `vx` is about to walk off
/// the platforms beneath it
///
/// A platform keeps the body on course when it extends at least as far as
/// the leading edge: `platform.left <= body.left` when heading left,
/// `platform.right >= body.right` when heading right. With nothing
/// beneath, the answer is always yes.
pub fn at_ledge<T: Bounded>(body: &Body, vx: f32, distance: f32, obstacles: &[T]) -> bool {
    !probe_below(body, distance, obstacles).iter().any(|p| {
        let platform = p.body();
        (vx <= 0.0 && platform.left() <= body.left())
            || (vx >= 0.0 && platform.right() >= body.right())
    })
}
