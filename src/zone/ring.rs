
use ::cgmath::{Matrix4, Vector3};
use ::cgmath::prelude::*;
use ::rand::Rng;

use ::math::{normalize_or_randomize, random_uniform, uniform_in_unit_ball};
use ::particle::PositionSink;
use ::transform::transform_direction;
use super::{plane_crossing, Anchor, Intersection, Zone};

/// A flat annulus around the zone position, embedded in 3D.
///
/// The ring lies in the plane through the position with the given
/// normal; particles spawn between `min_radius` and `max_radius` from
/// the center. With `min_radius = 0` the ring degenerates to a disc.
///
/// Like the other planar zones it has zero volume, so `contains` is
/// always false; boundary behavior is carried by `intersects` and
/// `move_at_border`.
pub struct Ring {
    anchor: Anchor,
    normal: Vector3<f32>,
    t_normal: Vector3<f32>,
    min_radius: f32,
    max_radius: f32,
    sqr_min_radius: f32,
    sqr_max_radius: f32
}

impl Ring {
    pub fn new(
        position: Vector3<f32>,
        normal: Vector3<f32>,
        min_radius: f32,
        max_radius: f32
    ) -> Ring {
        let mut ring = Ring {
            anchor: Anchor::new(position),
            normal: Vector3::new(0.0, 1.0, 0.0),
            t_normal: Vector3::new(0.0, 1.0, 0.0),
            min_radius: 0.0,
            max_radius: 0.0,
            sqr_min_radius: 0.0,
            sqr_max_radius: 0.0
        };
        ring.set_normal(normal);
        ring.set_radius(min_radius, max_radius);
        ring
    }

    /// Sets the plane normal. The given vector is normalized, it does
    /// not have to be unit length.
    pub fn set_normal(&mut self, normal: Vector3<f32>) {
        self.normal = normal.normalize();
        self.t_normal = self.normal;
    }

    /// Sets the radii of the annulus. Negative radii are inverted and
    /// the pair is reordered so that `min_radius <= max_radius`.
    pub fn set_radius(&mut self, min_radius: f32, max_radius: f32) {
        let mut min_radius = min_radius.abs();
        let mut max_radius = max_radius.abs();

        if min_radius > max_radius {
            ::std::mem::swap(&mut min_radius, &mut max_radius);
        }

        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self.sqr_min_radius = min_radius * min_radius;
        self.sqr_max_radius = max_radius * max_radius;
    }

    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    pub fn transformed_normal(&self) -> Vector3<f32> {
        self.t_normal
    }

    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }

    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }
}

impl Zone for Ring {
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

    /// Crossing a random ball draw with the normal yields a uniformly
    /// distributed in-plane direction; the radial magnitude is drawn
    /// uniformly in squared radius, which makes the distribution
    /// area-uniform over the annulus.
    fn generate_position(&self, rng: &mut Rng, sink: &mut PositionSink, _full: bool) {
        let ball = uniform_in_unit_ball(rng);
        let in_plane = normalize_or_randomize(rng, self.t_normal.cross(ball));

        let radius = random_uniform(rng, self.sqr_min_radius, self.sqr_max_radius).sqrt();

        sink.set_position(self.transformed_position() + in_plane * radius);
    }

    fn contains(&self, _point: Vector3<f32>) -> bool {
        false
    }

    fn intersects(&self, _rng: &mut Rng, v0: Vector3<f32>, v1: Vector3<f32>)
        -> Option<Intersection>
    {
        let center = self.transformed_position();

        plane_crossing(center, self.t_normal, v0, v1).and_then(|point| {
            let sqr_dist = point.distance2(center);

            // crossing through the hole or beyond the outer rim misses
            if sqr_dist < self.sqr_min_radius || sqr_dist > self.sqr_max_radius {
                return None;
            }

            Some(Intersection {
                point,
                normal: self.t_normal
            })
        })
    }

    /// Projects the point into the ring plane, then clamps its radial
    /// distance from the center into `[min_radius, max_radius]`.
    fn move_at_border(&self, rng: &mut Rng, point: &mut Vector3<f32>, _inside: bool) {
        let center = self.transformed_position();

        let dist = self.t_normal.dot(*point - center);
        *point -= self.t_normal * dist;

        let sqr_dist = point.distance2(center);

        if sqr_dist > self.sqr_max_radius {
            let radial = (*point - center) * (self.max_radius / sqr_dist.sqrt());
            *point = center + radial;
        } else if sqr_dist < self.sqr_min_radius {
            // a point at the exact center has no radial direction to
            // scale, substitute a random in-plane one
            let radial = if sqr_dist > 0.0 {
                (*point - center) * (self.min_radius / sqr_dist.sqrt())
            } else {
                let ball = uniform_in_unit_ball(rng);
                normalize_or_randomize(rng, self.t_normal.cross(ball)) * self.min_radius
            };
            *point = center + radial;
        }
    }

    fn compute_normal(&self, _rng: &mut Rng, _point: Vector3<f32>) -> Vector3<f32> {
        self.t_normal
    }
}
