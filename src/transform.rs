//! Application of an externally owned affine transform to cached
//! zone attributes.
//!
//! Positions go through the full affine map, directions and normals
//! only through its linear part. The owning simulation decides when a
//! transform changed and pushes it into `Zone::update_transform`, the
//! zones never recompute their world-space caches on their own.

use ::cgmath::{Matrix4, Vector3};

/// Maps a local-space point into world space with the full affine
/// transform, translation included.
pub fn transform_point(transform: &Matrix4<f32>, point: Vector3<f32>) -> Vector3<f32> {
    (transform * point.extend(1.0)).truncate()
}

/// Maps a local-space direction into world space with the linear part
/// of the transform only. The result is generally not unit length,
/// callers holding normals re-normalize after applying this.
pub fn transform_direction(transform: &Matrix4<f32>, direction: Vector3<f32>) -> Vector3<f32> {
    (transform * direction.extend(0.0)).truncate()
}
