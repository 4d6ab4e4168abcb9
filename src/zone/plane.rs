
use ::cgmath::{Matrix4, Vector3};
use ::cgmath::prelude::*;
use ::rand::Rng;

use ::particle::PositionSink;
use ::transform::transform_direction;
use super::{plane_crossing, Anchor, Intersection, Zone, APPROXIMATION_VALUE};

/// An infinite plane splitting space into an inside and an outside
/// half. The normal points from the inside to the outside.
///
/// Since the plane is unbounded there is no finite surface to sample:
/// `generate_position` degenerates to the plane's position. When used
/// for spawning, the zone behaves like a point; its value lies in the
/// boundary queries.
pub struct Plane {
    anchor: Anchor,
    normal: Vector3<f32>,
    t_normal: Vector3<f32>
}

impl Plane {
    pub fn new(position: Vector3<f32>, normal: Vector3<f32>) -> Plane {
        let mut plane = Plane {
            anchor: Anchor::new(position),
            normal: Vector3::new(0.0, 1.0, 0.0),
            t_normal: Vector3::new(0.0, 1.0, 0.0)
        };
        plane.set_normal(normal);
        plane
    }

    /// Sets the plane normal. The given vector is normalized, it does
    /// not have to be unit length.
    pub fn set_normal(&mut self, normal: Vector3<f32>) {
        self.normal = normal.normalize();
        self.t_normal = self.normal;
    }

    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    pub fn transformed_normal(&self) -> Vector3<f32> {
        self.t_normal
    }
}

impl Zone for Plane {
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
        self.t_normal = transform_direction(transform, self.normal).normalize();
    }

    fn generate_position(&self, _rng: &mut Rng, sink: &mut PositionSink, _full: bool) {
        sink.set_position(self.transformed_position());
    }

    fn contains(&self, point: Vector3<f32>) -> bool {
        self.t_normal.dot(point - self.transformed_position()) <= 0.0
    }

    fn intersects(&self, _rng: &mut Rng, v0: Vector3<f32>, v1: Vector3<f32>)
        -> Option<Intersection>
    {
        plane_crossing(self.transformed_position(), self.t_normal, v0, v1)
            .map(|point| Intersection {
                point,
                // constant over the whole plane, independent of the
                // crossing point
                normal: self.t_normal
            })
    }

    fn move_at_border(&self, _rng: &mut Rng, point: &mut Vector3<f32>, inside: bool) {
        let dist = self.t_normal.dot(*point - self.transformed_position());
        let offset = if inside { -APPROXIMATION_VALUE } else { APPROXIMATION_VALUE };
        *point += self.t_normal * (offset - dist);
    }

    fn compute_normal(&self, _rng: &mut Rng, _point: Vector3<f32>) -> Vector3<f32> {
        self.t_normal
    }
}
