//! Region-of-space abstractions used to seed particles and to bounce
//! them off boundaries.
//!
//! A zone answers five questions: where to spawn a particle
//! (`generate_position`), whether a point is in the zone (`contains`),
//! whether a segment crosses its boundary (`intersects`), where the
//! nearest border point is (`move_at_border`) and what the outward
//! normal at a point is (`compute_normal`). All shapes answer them
//! through the same trait, so emitters and modifiers never need to
//! know which shape they hold.

mod point;
mod line;
mod plane;
mod sphere;
mod cylinder;
mod ring;

pub use self::point::Point;
pub use self::line::Line;
pub use self::plane::Plane;
pub use self::sphere::Sphere;
pub use self::cylinder::Cylinder;
pub use self::ring::Ring;

use std::cell::RefCell;
use std::rc::Rc;

use ::cgmath::{Matrix4, Vector3};
use ::rand::Rng;

use ::particle::PositionSink;
use ::transform::transform_point;

/// Offset applied to computed border and intersection points so they
/// land strictly on one side of the boundary. Without it, a particle
/// moved onto a border would re-trigger the same crossing on the next
/// step.
pub const APPROXIMATION_VALUE: f32 = 0.01;

/// A boundary crossing reported by `Zone::intersects`.
///
/// The point is pulled back along the segment by `APPROXIMATION_VALUE`
/// so it lies strictly before the boundary; the normal points out of
/// the zone.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Intersection {
    pub point: Vector3<f32>,
    pub normal: Vector3<f32>
}

/// A region of space with a local position and a cached world-space
/// counterpart.
///
/// The cached transformed attributes are refreshed only through
/// `update_transform`; reads never recompute them. The owning
/// simulation calls `update_transform` whenever the external transform
/// of the zone changed.
///
/// Sampling operations take the random generator as an explicit
/// argument, so a seeded generator reproduces every draw.
pub trait Zone {
    /// The local-space position, the center of the zone.
    fn position(&self) -> Vector3<f32>;

    /// Sets the local-space position and mirrors it into the
    /// transformed cache until the next `update_transform`.
    fn set_position(&mut self, position: Vector3<f32>);

    /// The cached world-space position.
    fn transformed_position(&self) -> Vector3<f32>;

    /// Recomputes all cached world-space attributes from the given
    /// transform.
    fn update_transform(&mut self, transform: &Matrix4<f32>);

    /// Samples a position in the zone and writes it into the sink.
    /// With `full`, the whole volume is sampled, otherwise only the
    /// boundary. Sampling is area-uniform on surfaces and
    /// volume-uniform in volumes.
    fn generate_position(&self, rng: &mut Rng, sink: &mut PositionSink, full: bool);

    /// Whether the point lies in the zone. The zone is closed, points
    /// on the boundary count as contained.
    fn contains(&self, point: Vector3<f32>) -> bool;

    /// Whether the segment from `v0` to `v1` crosses the boundary of
    /// the zone, and if so, where.
    fn intersects(&self, rng: &mut Rng, v0: Vector3<f32>, v1: Vector3<f32>)
        -> Option<Intersection>;

    /// Moves the point onto the border of the zone, offset by
    /// `APPROXIMATION_VALUE` to the inside or outside so repeated
    /// calls converge instead of oscillating across the boundary.
    fn move_at_border(&self, rng: &mut Rng, point: &mut Vector3<f32>, inside: bool);

    /// The outward unit normal as if the point lay on the boundary.
    /// Degenerate points still receive a definite unit vector.
    fn compute_normal(&self, rng: &mut Rng, point: Vector3<f32>) -> Vector3<f32>;
}

/// Reference-counted zone handle for emitters and modifiers that share
/// a zone. A zone lives as long as any holder keeps its handle.
pub type ZoneRef = Rc<RefCell<Zone>>;

/// Wraps a zone into a shared handle.
pub fn share<Z>(zone: Z) -> ZoneRef
    where Z: Zone + 'static
{
    Rc::new(RefCell::new(zone))
}

/// Parametric crossing of the segment `v0→v1` with the plane through
/// `t_position` with unit normal `t_normal`, shared by the planar
/// zones.
///
/// Rejects segments whose endpoints sit on the same side. The crossing
/// is pulled back along the segment by `APPROXIMATION_VALUE` (down to
/// `v0` itself when the crossing is closer than that), so the reported
/// point lies strictly before the boundary.
pub fn plane_crossing(
    t_position: Vector3<f32>,
    t_normal: Vector3<f32>,
    v0: Vector3<f32>,
    v1: Vector3<f32>
) -> Option<Vector3<f32>> {
    use ::cgmath::prelude::*;

    let mut dist0 = t_normal.dot(v0 - t_position);
    let mut dist1 = t_normal.dot(v1 - t_position);

    // both endpoints on the same side
    if (dist0 <= 0.0) == (dist1 <= 0.0) {
        return None;
    }

    if dist0 <= 0.0 {
        dist0 = -dist0;
    } else {
        dist1 = -dist1;
    }

    let mut along = dist0 / (dist0 + dist1);

    let dir = v1 - v0;
    let travelled = dir.magnitude() * along;
    along = if travelled < APPROXIMATION_VALUE {
        0.0
    } else {
        along * (travelled - APPROXIMATION_VALUE) / travelled
    };

    Some(v0 + dir * along)
}

/// Local position paired with its cached world-space image, embedded
/// by every shape.
pub struct Anchor {
    position: Vector3<f32>,
    t_position: Vector3<f32>
}

impl Anchor {
    pub fn new(position: Vector3<f32>) -> Anchor {
        Anchor {
            position,
            t_position: position
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn transformed_position(&self) -> Vector3<f32> {
        self.t_position
    }

    /// Sets the local position and mirrors it into the cache. The
    /// mirrored value stands in until the next transform refresh.
    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.t_position = position;
    }

    pub fn update_transform(&mut self, transform: &Matrix4<f32>) {
        self.t_position = transform_point(transform, self.position);
    }
}
