
use ::cgmath::{Matrix4, Vector3};
use ::cgmath::prelude::*;
use ::rand::Rng;

use ::math::{normalize_or_randomize, random_uniform};
use ::particle::PositionSink;
use ::transform::transform_point;
use super::{Anchor, Intersection, Zone};

/// A segment between two bounds.
///
/// The zone position is always the midpoint of the bounds, so moving
/// the position translates both bounds by the same vector, and moving
/// a bound moves the position along with it.
///
/// A line has zero volume: it can seed particles but never contains a
/// point and never reports a boundary crossing, so it cannot take part
/// in collision-style modifiers.
pub struct Line {
    anchor: Anchor,
    bounds: [Vector3<f32>; 2],
    t_bounds: [Vector3<f32>; 2],
    /// Cached delta between the transformed bounds.
    t_dist: Vector3<f32>
}

impl Line {
    pub fn new(p0: Vector3<f32>, p1: Vector3<f32>) -> Line {
        let mut line = Line {
            anchor: Anchor::new((p0 + p1) * 0.5),
            bounds: [p0, p1],
            t_bounds: [p0, p1],
            t_dist: p1 - p0
        };
        line.set_bounds(p0, p1);
        line
    }

    /// The bound with the given index, 0 or 1. Any other index is a
    /// caller error and panics.
    pub fn bound(&self, index: usize) -> Vector3<f32> {
        self.bounds[index]
    }

    /// The transformed bound with the given index, 0 or 1.
    pub fn transformed_bound(&self, index: usize) -> Vector3<f32> {
        self.t_bounds[index]
    }

    pub fn set_bounds(&mut self, p0: Vector3<f32>, p1: Vector3<f32>) {
        self.bounds = [p0, p1];
        self.t_bounds = [p0, p1];
        self.compute_dist();
        self.compute_position();
    }

    /// Slides the segment window ahead: the first bound becomes the
    /// old second bound and the second bound the given one.
    ///
    /// Pushing bounds along the trajectory of a moving emission source
    /// lets a single line trail a point cloud behind it.
    pub fn push_bound(&mut self, bound: Vector3<f32>) {
        let kept = self.bounds[1];
        self.set_bounds(kept, bound);
    }

    fn compute_dist(&mut self) {
        self.t_dist = self.t_bounds[1] - self.t_bounds[0];
    }

    fn compute_position(&mut self) {
        self.anchor.set_position((self.bounds[0] + self.bounds[1]) * 0.5);
    }
}

impl Zone for Line {
    fn position(&self) -> Vector3<f32> {
        self.anchor.position()
    }

    /// Moves the midpoint, dragging both bounds along by the same
    /// displacement.
    fn set_position(&mut self, position: Vector3<f32>) {
        let displacement = position - self.anchor.position();
        let (p0, p1) = (self.bounds[0] + displacement, self.bounds[1] + displacement);
        self.set_bounds(p0, p1);
    }

    fn transformed_position(&self) -> Vector3<f32> {
        self.anchor.transformed_position()
    }

    fn update_transform(&mut self, transform: &Matrix4<f32>) {
        self.anchor.update_transform(transform);
        self.t_bounds = [
            transform_point(transform, self.bounds[0]),
            transform_point(transform, self.bounds[1])
        ];
        self.compute_dist();
    }

    /// Samples uniformly along the transformed segment. A line has no
    /// interior to distinguish from its boundary, so `full` has no
    /// effect.
    fn generate_position(&self, rng: &mut Rng, sink: &mut PositionSink, _full: bool) {
        let along = random_uniform(rng, 0.0, 1.0);
        sink.set_position(self.t_bounds[0] + self.t_dist * along);
    }

    fn contains(&self, _point: Vector3<f32>) -> bool {
        false
    }

    fn intersects(&self, _rng: &mut Rng, _v0: Vector3<f32>, _v1: Vector3<f32>)
        -> Option<Intersection>
    {
        None
    }

    fn move_at_border(&self, _rng: &mut Rng, _point: &mut Vector3<f32>, _inside: bool) {}

    /// Offset direction from the nearest point on the segment,
    /// randomized for points lying on the segment itself.
    fn compute_normal(&self, rng: &mut Rng, point: Vector3<f32>) -> Vector3<f32> {
        let sqr_length = self.t_dist.magnitude2();

        let along = if sqr_length > 0.0 {
            let along = self.t_dist.dot(point - self.t_bounds[0]) / sqr_length;
            along.max(0.0).min(1.0)
        } else {
            0.0
        };

        let foot = self.t_bounds[0] + self.t_dist * along;
        normalize_or_randomize(rng, point - foot)
    }
}
