
use std::f32::consts::{FRAC_PI_2, PI};

use ::cgmath::{Matrix4, Vector3};
use ::cgmath::prelude::*;
use ::rand::Rng;

use ::math::{normalize_or_randomize, random_uniform};
use ::particle::PositionSink;
use ::transform::transform_direction;
use super::{Anchor, Intersection, Zone, APPROXIMATION_VALUE};

/// A finite capped cylinder with an arbitrary axis.
///
/// The zone position is the center of the cylinder, the axis runs
/// along `direction` and the caps sit at `±length / 2` from the
/// center.
pub struct Cylinder {
    anchor: Anchor,
    direction: Vector3<f32>,
    t_direction: Vector3<f32>,
    radius: f32,
    length: f32
}

impl Cylinder {
    pub fn new(
        position: Vector3<f32>,
        direction: Vector3<f32>,
        radius: f32,
        length: f32
    ) -> Cylinder {
        let mut cylinder = Cylinder {
            anchor: Anchor::new(position),
            direction: Vector3::new(0.0, 1.0, 0.0),
            t_direction: Vector3::new(0.0, 1.0, 0.0),
            radius: 0.0,
            length: 0.0
        };
        cylinder.set_direction(direction);
        cylinder.set_radius(radius);
        cylinder.set_length(length);
        cylinder
    }

    /// Sets the axis direction. The given vector is normalized, it
    /// does not have to be unit length.
    pub fn set_direction(&mut self, direction: Vector3<f32>) {
        self.direction = direction.normalize();
        self.t_direction = self.direction;
    }

    /// Sets the radius. Negative radii are inverted.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.abs();
    }

    /// Sets the length along the axis. Negative lengths are inverted.
    pub fn set_length(&mut self, length: f32) {
        self.length = length.abs();
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn transformed_direction(&self) -> Vector3<f32> {
        self.t_direction
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Builds an orthonormal basis of the lateral plane perpendicular
    /// to the axis.
    ///
    /// No canonical perpendicular exists in 3D, so an arbitrary
    /// reference vector is projected off the axis, perturbed and
    /// retried in the degenerate case that it is collinear with the
    /// axis.
    fn lateral_basis(&self, rng: &mut Rng) -> (Vector3<f32>, Vector3<f32>) {
        let mut reference = Vector3::new(10.0, 10.0, 10.0);
        let mut lateral = reference - self.t_direction * self.t_direction.dot(reference);

        while lateral.magnitude2() == 0.0 {
            reference += Vector3::new(10.0, 10.0, random_uniform(rng, -10.0, 10.0));
            lateral = reference - self.t_direction * self.t_direction.dot(reference);
        }

        let a = lateral.normalize();
        let b = self.t_direction.cross(a);
        (a, b)
    }

    /// Splits the offset from the center into the signed distance
    /// along the axis and the radial offset perpendicular to it.
    fn decompose(&self, point: Vector3<f32>) -> (f32, Vector3<f32>) {
        let offset = point - self.transformed_position();
        let axial = self.t_direction.dot(offset);
        (axial, offset - self.t_direction * axial)
    }
}

impl Zone for Cylinder {
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
        self.t_direction = transform_direction(transform, self.direction).normalize();
    }

    fn generate_position(&self, rng: &mut Rng, sink: &mut PositionSink, full: bool) {
        let radial = if full {
            random_uniform(rng, 0.0, self.radius)
        } else {
            // boundary sampling covers the lateral surface
            self.radius
        };
        let half = self.length * 0.5;
        let axial = random_uniform(rng, -half, half);
        let angle = random_uniform(rng, 0.0, 2.0 * PI);

        let (a, b) = self.lateral_basis(rng);

        sink.set_position(
            self.transformed_position()
                + self.t_direction * axial
                + a * (radial * angle.cos())
                + b * (radial * angle.sin())
        );
    }

    fn contains(&self, point: Vector3<f32>) -> bool {
        let (axial, radial) = self.decompose(point);

        axial.abs() <= self.length * 0.5 && radial.magnitude2() <= self.radius * self.radius
    }

    fn intersects(&self, rng: &mut Rng, v0: Vector3<f32>, v1: Vector3<f32>)
        -> Option<Intersection>
    {
        let dir = v1 - v0;
        if dir.magnitude2() == 0.0 {
            return None;
        }
        let u = dir.normalize();

        let axis_cross = u.cross(self.t_direction);

        if axis_cross.magnitude2() == 0.0 {
            // query runs parallel to the axis, reduce to a radial
            // distance comparison
            let (_, radial_vec) = self.decompose(v0);
            let r = radial_vec.magnitude();

            if r > self.radius {
                return None;
            }

            let radial = normalize_or_randomize(rng, radial_vec);
            let point = if r == self.radius {
                // grazing along the lateral surface
                self.transformed_position() + radial * self.radius
            } else {
                // running inside, crossing happens at a cap
                self.transformed_position()
                    + self.t_direction * (self.length * 0.5)
                    + radial * r
            };

            return Some(Intersection {
                point,
                normal: self.compute_normal(rng, point)
            });
        }

        // minimum distance between the query line and the axis line
        let skew = (self.transformed_position() - v0).dot(axis_cross).abs()
            / axis_cross.magnitude();
        if skew > self.radius {
            return None;
        }

        let (_, radial_vec) = self.decompose(v0);
        let r = radial_vec.magnitude();

        // walk along the query line to its closest approach to the axis
        let approach = if r > 0.0 {
            (skew / r).min(1.0).asin().cos() * r
        } else {
            0.0
        };
        let closest = v0 + u * approach;

        if !self.contains(closest) {
            return None;
        }

        let angular_correction = if self.radius > 0.0 {
            FRAC_PI_2 * skew / self.radius
        } else {
            0.0
        };
        let point = closest - u * (angular_correction + APPROXIMATION_VALUE);

        Some(Intersection {
            point,
            normal: self.compute_normal(rng, point)
        })
    }

    /// Clamps the axial distance into `[-length/2, length/2]` and the
    /// radial distance into the radius, each offset by
    /// `APPROXIMATION_VALUE` and applied independently, so a point near
    /// a cap edge is pulled in on both axes.
    fn move_at_border(&self, rng: &mut Rng, point: &mut Vector3<f32>, inside: bool) {
        let approx = if inside { -APPROXIMATION_VALUE } else { APPROXIMATION_VALUE };
        let half = self.length * 0.5;

        let (axial, radial_vec) = self.decompose(*point);
        let r = radial_vec.magnitude();
        let radial = normalize_or_randomize(rng, radial_vec);

        if axial.abs() > half {
            let clamped = if axial > half { half + approx } else { -half - approx };
            *point += self.t_direction * (clamped - axial);

            if r > self.radius {
                *point -= radial * (r - self.radius - approx);
            }
        } else if r > self.radius {
            *point -= radial * (r - self.radius - approx);
        } else {
            *point += radial * (self.radius - r + approx);
        }
    }

    fn compute_normal(&self, rng: &mut Rng, point: Vector3<f32>) -> Vector3<f32> {
        let (axial, radial) = self.decompose(point);

        if axial >= self.length * 0.5 {
            return self.t_direction;
        }
        if axial <= -self.length * 0.5 {
            return -self.t_direction;
        }

        normalize_or_randomize(rng, radial)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ::particle::Particle;
    use ::rand::{SeedableRng, XorShiftRng};

    fn rng() -> XorShiftRng {
        XorShiftRng::from_seed([17, 18, 19, 20])
    }

    /// Axis along y, radius 2, caps at y = ±2.
    fn upright() -> Cylinder {
        Cylinder::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0), 2.0, 4.0)
    }

    #[test]
    fn contains_respects_caps_and_radius() {
        let cylinder = upright();

        assert!(cylinder.contains(Vector3::new(0.0, 1.0, 0.0)));
        // axial distance 3 exceeds the half length 2
        assert!(!cylinder.contains(Vector3::new(0.0, 3.0, 0.0)));
        // radial distance exceeds the radius
        assert!(!cylinder.contains(Vector3::new(2.5, 0.0, 0.0)));
        // boundary counts as contained
        assert!(cylinder.contains(Vector3::new(2.0, 2.0, 0.0)));
    }

    #[test]
    fn direction_setter_normalizes() {
        let mut cylinder = upright();
        cylinder.set_direction(Vector3::new(0.0, 0.0, -3.0));

        assert_eq!(cylinder.direction(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn negative_parameters_are_inverted() {
        let cylinder = Cylinder::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            -3.0,
            -8.0
        );

        assert_eq!(cylinder.radius(), 3.0);
        assert_eq!(cylinder.length(), 8.0);
    }

    #[test]
    fn volume_samples_stay_contained() {
        let cylinder = upright();
        let mut rng = rng();
        let mut particle = Particle::new();

        for _ in 0..1000 {
            cylinder.generate_position(&mut rng, &mut particle, true);
            assert!(
                cylinder.contains(particle.position()),
                "Volume sample {:?} escaped the cylinder",
                particle.position()
            );
        }
    }

    #[test]
    fn surface_samples_sit_on_the_lateral_wall() {
        let cylinder = upright();
        let mut rng = rng();
        let mut particle = Particle::new();

        for _ in 0..1000 {
            cylinder.generate_position(&mut rng, &mut particle, false);
            let p = particle.position();
            let radial = Vector3::new(p.x, 0.0, p.z).magnitude();

            assert!(
                (radial - 2.0).abs() < 1e-4,
                "Lateral sample at radial distance {} instead of 2",
                radial
            );
            assert!(p.y.abs() <= 2.0 + 1e-4, "Lateral sample {:?} beyond the caps", p);
        }
    }

    #[test]
    fn works_with_a_skewed_axis() {
        let cylinder = Cylinder::new(
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(1.0, 1.0, 0.0),
            0.5,
            2.0
        );
        let mut rng = rng();
        let mut particle = Particle::new();

        for _ in 0..1000 {
            cylinder.generate_position(&mut rng, &mut particle, true);
            assert!(
                cylinder.contains(particle.position()),
                "Volume sample {:?} escaped the skewed cylinder",
                particle.position()
            );
        }
    }

    #[test]
    fn perpendicular_segment_intersects_the_wall() {
        let cylinder = Cylinder::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            1.0,
            4.0
        );
        let mut rng = rng();

        let hit = cylinder
            .intersects(&mut rng, Vector3::new(-3.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0))
            .expect("Segment into the cylinder crosses the wall");

        assert!(hit.point.x < 0.0, "Crossing {:?} should sit before the axis", hit.point);
        assert_eq!(hit.normal, Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn axis_parallel_segment_inside_crosses_a_cap() {
        let cylinder = Cylinder::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            1.0,
            4.0
        );
        let mut rng = rng();

        let hit = cylinder
            .intersects(&mut rng, Vector3::new(0.5, -5.0, 0.0), Vector3::new(0.5, 5.0, 0.0))
            .expect("Axis-parallel segment inside the radius crosses the caps");

        assert_eq!(hit.point, Vector3::new(0.5, 2.0, 0.0));
        assert_eq!(hit.normal, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn axis_parallel_segment_outside_misses() {
        let cylinder = Cylinder::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            1.0,
            4.0
        );
        let mut rng = rng();

        assert!(
            cylinder
                .intersects(&mut rng, Vector3::new(3.0, -5.0, 0.0), Vector3::new(3.0, 5.0, 0.0))
                .is_none()
        );
    }

    #[test]
    fn distant_segment_misses() {
        let cylinder = upright();
        let mut rng = rng();

        assert!(
            cylinder
                .intersects(&mut rng, Vector3::new(-5.0, 0.0, 4.0), Vector3::new(5.0, 0.0, 4.0))
                .is_none(),
            "Line with skew distance beyond the radius cannot intersect"
        );
    }

    #[test]
    fn move_at_border_clamps_toward_the_nearer_cap() {
        let cylinder = upright();
        let mut rng = rng();

        let mut above = Vector3::new(0.0, 5.0, 0.0);
        cylinder.move_at_border(&mut rng, &mut above, false);
        assert!((above.y - (2.0 + APPROXIMATION_VALUE)).abs() < 1e-5, "Got {:?}", above);

        let mut below = Vector3::new(0.0, -5.0, 0.0);
        cylinder.move_at_border(&mut rng, &mut below, false);
        assert!((below.y - -(2.0 + APPROXIMATION_VALUE)).abs() < 1e-5, "Got {:?}", below);
    }

    #[test]
    fn move_at_border_pushes_interior_points_to_the_wall() {
        let cylinder = upright();
        let mut rng = rng();

        let mut point = Vector3::new(0.5, 0.0, 0.0);
        cylinder.move_at_border(&mut rng, &mut point, true);

        assert!((point.x - (2.0 - APPROXIMATION_VALUE)).abs() < 1e-5, "Got {:?}", point);
        assert_eq!(point.y, 0.0);
    }

    #[test]
    fn move_at_border_pulls_corner_points_on_both_axes() {
        let cylinder = upright();
        let mut rng = rng();

        let mut corner = Vector3::new(4.0, 4.0, 0.0);
        cylinder.move_at_border(&mut rng, &mut corner, false);

        assert!((corner.y - (2.0 + APPROXIMATION_VALUE)).abs() < 1e-5, "Got {:?}", corner);
        assert!((corner.x - (2.0 + APPROXIMATION_VALUE)).abs() < 1e-5, "Got {:?}", corner);
    }

    #[test]
    fn normal_beyond_a_cap_is_the_axis() {
        let cylinder = upright();
        let mut rng = rng();

        assert_eq!(
            cylinder.compute_normal(&mut rng, Vector3::new(0.0, 7.0, 0.0)),
            Vector3::new(0.0, 1.0, 0.0)
        );
        assert_eq!(
            cylinder.compute_normal(&mut rng, Vector3::new(0.0, -7.0, 0.0)),
            Vector3::new(0.0, -1.0, 0.0)
        );
    }

    #[test]
    fn normal_beside_the_wall_is_radial() {
        let cylinder = upright();
        let mut rng = rng();

        assert_eq!(
            cylinder.compute_normal(&mut rng, Vector3::new(0.0, 0.5, -3.0)),
            Vector3::new(0.0, 0.0, -1.0)
        );
    }

    #[test]
    fn normal_on_the_axis_is_still_unit_length() {
        let cylinder = upright();
        let mut rng = rng();

        let normal = cylinder.compute_normal(&mut rng, Vector3::new(0.0, 0.5, 0.0));
        assert!((normal.magnitude() - 1.0).abs() < 1e-6);
    }
}
