
#[macro_use]
extern crate log;
extern crate cgmath;
extern crate rand;

mod math;
mod particle;
mod transform;
mod zone;

pub use math::{random_uniform, normalize_or_randomize};
pub use particle::{Particle, PositionSink};
pub use transform::{transform_point, transform_direction};
pub use zone::{
    Zone,
    ZoneRef,
    Intersection,
    APPROXIMATION_VALUE,
    share,
    Point,
    Line,
    Plane,
    Sphere,
    Cylinder,
    Ring
};
