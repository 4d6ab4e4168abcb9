
use ::cgmath::{Matrix4, Vector3};
use ::rand::Rng;

use ::math::normalize_or_randomize;
use ::particle::PositionSink;
use super::{Anchor, Intersection, Zone};

/// A zero-extent zone. Sampling always yields its transformed
/// position; every extent-dependent query degenerates.
pub struct Point {
    anchor: Anchor
}

impl Point {
    pub fn new(position: Vector3<f32>) -> Point {
        Point {
            anchor: Anchor::new(position)
        }
    }
}

impl Zone for Point {
    fn position(&self) -> Vector3<f32> {
        self.anchor.position()
    }

    fn set_position(&mut self, position: Vector3<f32>) {
        self.anchor.set_position(position);
    }

    fn transformed_position(&self) -> Vector3<f32> {
        self.anchor.transformed_position()
    }

    fn update_transform(&mut self, transform: &Matrix4<f32>) {
        self.anchor.update_transform(transform);
    }

    fn generate_position(&self, _rng: &mut Rng, sink: &mut PositionSink, _full: bool) {
        sink.set_position(self.transformed_position());
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

    /// A single point has no boundary, so the normal is arbitrary.
    /// The offset direction from the point is returned, randomized
    /// when the query coincides with the point itself.
    fn compute_normal(&self, rng: &mut Rng, point: Vector3<f32>) -> Vector3<f32> {
        normalize_or_randomize(rng, point - self.transformed_position())
    }
}
