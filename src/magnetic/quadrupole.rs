//! Magnetic quadrupole fields

use super::MagneticFieldSampler;
use crate::atom::Position;
use nalgebra::Vector3;
use specs::{Component, HashMapStorage, Join, ReadStorage, System, WriteStorage};

/// A component representing a 3D quadrupole field.
///
/// The node of the quadrupole is given by the [Position] of the entity.
#[derive(Clone, Copy, Debug)]
pub struct QuadrupoleField3D {
    /// Gradient of the quadrupole field, in units of Tesla/m
    pub gradient: f64,
    /// A unit vector pointing along the symmetry axis of the 3D quadrupole field.
    pub direction: Vector3<f64>,
}

impl QuadrupoleField3D {
    /// Creates a `QuadrupoleField3D` component with gradient specified in Gauss per cm.
    #[inline]
    pub fn gauss_per_cm(gradient: f64, direction: Vector3<f64>) -> Self {
        Self {
            gradient: gradient * 0.01,
            direction: direction.normalize(),
        }
    }

    /// Calculates the quadrupole magnetic field.
    /// The field is defined with components `Bx = grad*x`, `By = grad*y`, `Bz = -2 * grad * z`.
    ///
    /// # Arguments
    ///
    /// `pos`: position of the sampler, m
    ///
    /// `centre`: position of the quadrupole node, m
    ///
    /// `gradient`: quadrupole gradient, in Tesla/m
    ///
    /// `direction`: A _normalized_ vector pointing in the direction of the quadrupole's symmetry axis.
    pub fn calculate_field(
        pos: Vector3<f64>,
        centre: Vector3<f64>,
        gradient: f64,
        direction: Vector3<f64>,
    ) -> Vector3<f64> {
        let delta = pos - centre;
        let z_comp = delta.dot(&direction) * direction;
        let r_comp = delta - z_comp;
        gradient * (r_comp - 2.0 * z_comp)
    }
}

impl Component for QuadrupoleField3D {
    type Storage = HashMapStorage<Self>;
}

/// Updates the values of magnetic field samplers to include quadrupole fields in the world.
pub struct Sample3DQuadrupoleFieldSystem;

impl<'a> System<'a> for Sample3DQuadrupoleFieldSystem {
    type SystemData = (
        WriteStorage<'a, MagneticFieldSampler>,
        ReadStorage<'a, Position>,
        ReadStorage<'a, QuadrupoleField3D>,
    );

    fn run(&mut self, (mut sampler, pos, quadrupole): Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        for (centre, quadrupole) in (&pos, &quadrupole).join() {
            (&pos, &mut sampler)
                .par_join()
                .for_each(|(pos, sampler)| {
                    let quad_field = QuadrupoleField3D::calculate_field(
                        pos.pos,
                        centre.pos,
                        quadrupole.gradient,
                        quadrupole.direction,
                    );
                    sampler.field += quad_field;
                });
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_quadrupole_field() {
        let pos = Vector3::new(1.0, 1.0, 1.0);
        let centre = Vector3::new(0.0, 1.0, 0.0);
        let gradient = 1.0;
        let field = QuadrupoleField3D::calculate_field(pos, centre, gradient, Vector3::z());
        assert_eq!(field, Vector3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn test_quadrupole_field_along_tilted_axis() {
        let axis = Vector3::new(1.0, 1.0, 0.0).normalize();
        let pos = axis * 0.5;
        let field =
            QuadrupoleField3D::calculate_field(pos, Vector3::new(0.0, 0.0, 0.0), 2.0, axis);
        assert_approx_eq!(field.dot(&axis), -2.0);
        assert_approx_eq!(field.norm(), 2.0);
    }
}
