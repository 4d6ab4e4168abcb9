
use ::cgmath::Vector3;

/// Receives sampled positions from `Zone::generate_position`.
///
/// The simulation's own particle type can implement this to be seeded
/// directly, without an intermediate copy.
pub trait PositionSink {
    fn set_position(&mut self, position: Vector3<f32>);
}

impl PositionSink for Vector3<f32> {
    fn set_position(&mut self, position: Vector3<f32>) {
        *self = position;
    }
}

/// A minimal particle holding nothing but a position.
pub struct Particle {
    position: Vector3<f32>
}

impl Particle {
    pub fn new() -> Particle {
        Particle {
            position: Vector3::new(0.0, 0.0, 0.0)
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }
}

impl PositionSink for Particle {
    fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }
}
