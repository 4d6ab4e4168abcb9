
use ::cgmath::{Matrix4, Vector3};
use ::cgmath::prelude::*;
use ::rand::Rng;

use ::math::{normalize_or_randomize, random_uniform};
use ::particle::PositionSink;
use super::{Anchor, Intersection, Zone, APPROXIMATION_VALUE};

/// A closed ball around the zone position.
pub struct Sphere {
    anchor: Anchor,
    radius: f32
}

impl Sphere {
    pub fn new(position: Vector3<f32>, radius: f32) -> Sphere {
        let mut sphere = Sphere {
            anchor: Anchor::new(position),
            radius: 0.0
        };
        sphere.set_radius(radius);
        sphere
    }

    /// Sets the radius. Negative radii are inverted.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.abs();
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Zone for Sphere {
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

    /// Rejection-samples the enclosing cube until the draw falls into
    /// the ball, which makes the interior distribution volume-uniform.
    /// Surface sampling rescales the accepted draw onto the boundary,
    /// which is area-uniform by symmetry.
    fn generate_position(&self, rng: &mut Rng, sink: &mut PositionSink, full: bool) {
        let mut local;
        loop {
            local = Vector3::new(
                random_uniform(rng, -self.radius, self.radius),
                random_uniform(rng, -self.radius, self.radius),
                random_uniform(rng, -self.radius, self.radius)
            );

            if local.magnitude2() <= self.radius * self.radius {
                break;
            }
        }

        if !full && self.radius > 0.0 {
            local = normalize_or_randomize(rng, local) * self.radius;
        }

        sink.set_position(local + self.transformed_position());
    }

    fn contains(&self, point: Vector3<f32>) -> bool {
        self.transformed_position().distance2(point) <= self.radius * self.radius
    }

    fn intersects(&self, rng: &mut Rng, v0: Vector3<f32>, v1: Vector3<f32>)
        -> Option<Intersection>
    {
        let center = self.transformed_position();
        let sqr_radius = self.radius * self.radius;

        let dist0 = center.distance2(v0);
        let dist1 = center.distance2(v1);

        // a crossing needs one endpoint inside and one outside
        if (dist0 <= sqr_radius) == (dist1 <= sqr_radius) {
            return None;
        }

        let dir = v1 - v0;
        let length = dir.magnitude();

        // chord quadratic along the segment direction
        let mid = dir.dot(center - v0) / length;
        let half_chord = (sqr_radius - dist0 + mid * mid).sqrt();

        let mut along = if dist0 <= sqr_radius {
            mid + half_chord
        } else {
            mid - half_chord
        };
        along = (along / length).max(0.0).min(1.0);

        let travelled = length * along;
        along = if travelled < APPROXIMATION_VALUE {
            0.0
        } else {
            along * (travelled - APPROXIMATION_VALUE) / travelled
        };

        let point = v0 + dir * along;

        Some(Intersection {
            point,
            normal: normalize_or_randomize(rng, point - center)
        })
    }

    fn move_at_border(&self, rng: &mut Rng, point: &mut Vector3<f32>, inside: bool) {
        let center = self.transformed_position();
        let radial = normalize_or_randomize(rng, *point - center);

        let target = if inside {
            self.radius - APPROXIMATION_VALUE
        } else {
            self.radius + APPROXIMATION_VALUE
        };

        *point = center + radial * target;
    }

    fn compute_normal(&self, rng: &mut Rng, point: Vector3<f32>) -> Vector3<f32> {
        normalize_or_randomize(rng, point - self.transformed_position())
    }
}
