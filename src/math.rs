//! Scalar and vector sampling helpers shared by all zones.

use ::cgmath::Vector3;
use ::cgmath::prelude::*;
use ::rand::Rng;

/// Draws a uniformly distributed scalar in `[low, high)`.
pub fn random_uniform<R>(rng: &mut R, low: f32, high: f32) -> f32
    where R: Rng + ?Sized
{
    low + (high - low) * rng.next_f32()
}

/// Draws a point uniformly distributed inside the unit ball by
/// rejection sampling the enclosing cube.
///
/// The zero vector is a valid (if improbable) draw, callers that need
/// a direction should go through `normalize_or_randomize` instead.
pub fn uniform_in_unit_ball<R>(rng: &mut R) -> Vector3<f32>
    where R: Rng + ?Sized
{
    loop {
        let candidate = Vector3::new(
            random_uniform(rng, -1.0, 1.0),
            random_uniform(rng, -1.0, 1.0),
            random_uniform(rng, -1.0, 1.0)
        );

        if candidate.magnitude2() <= 1.0 {
            return candidate;
        }
    }
}

/// Normalizes the given vector. If it is the zero vector and has no
/// direction to preserve, a uniformly distributed random unit vector is
/// substituted so that callers always receive a usable direction.
pub fn normalize_or_randomize<R>(rng: &mut R, v: Vector3<f32>) -> Vector3<f32>
    where R: Rng + ?Sized
{
    let mut v = v;

    if v.magnitude2() == 0.0 {
        warn!("Normalizing the zero vector, substituting a random unit direction");

        while v.magnitude2() == 0.0 {
            v = uniform_in_unit_ball(rng);
        }
    }

    v.normalize()
}
