//! Laser beams with a gaussian intensity profile.

use crate::atom::Position;
use crate::laser_cooling::transition::AtomicTransition;
use crate::maths;
use nalgebra::Vector3;
use specs::{Component, HashMapStorage};

/// A component representing a beam with a gaussian intensity profile.
///
/// The beam is assumed to be collimated, so the radius does not change along the beam.
#[derive(Clone, Copy, Debug)]
pub struct GaussianBeam {
    /// A point that the laser beam intersects
    pub intersection: Vector3<f64>,

    /// Direction the beam propagates with respect to cartesian `x,y,z` axes.
    pub direction: Vector3<f64>,

    /// Radius of the beam at which the intensity is 1/e of the peak value, SI units of m.
    ///
    /// An infinite radius describes a plane wave.
    pub e_radius: f64,

    /// Intensity on the beam axis, SI units of W/m^2.
    pub peak_intensity: f64,
}

impl Component for GaussianBeam {
    type Storage = HashMapStorage<Self>;
}

impl GaussianBeam {
    /// Creates a beam whose peak intensity is `saturation` times the saturation intensity of `transition`.
    pub fn from_saturation_parameter(
        intersection: Vector3<f64>,
        direction: Vector3<f64>,
        saturation: f64,
        e_radius: f64,
        transition: &AtomicTransition,
    ) -> Self {
        GaussianBeam {
            intersection,
            direction: direction.normalize(),
            e_radius,
            peak_intensity: saturation * transition.saturation_intensity,
        }
    }

    /// Total power of the beam in W. Infinite for plane waves.
    pub fn power(&self) -> f64 {
        self.peak_intensity * crate::constant::PI * self.e_radius.powi(2)
    }
}

/// Gets the intensity of a gaussian laser beam at the specified position.
pub fn get_gaussian_beam_intensity(beam: &GaussianBeam, pos: &Position) -> f64 {
    if beam.e_radius.is_infinite() {
        return beam.peak_intensity;
    }
    let (distance, _) =
        maths::get_minimum_distance_line_point(&pos.pos, &beam.intersection, &beam.direction);
    beam.peak_intensity * (-(distance / beam.e_radius).powi(2)).exp()
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::constant::PI;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_get_gaussian_beam_intensity() {
        let power = 1.0;
        let e_radius = 2.0;
        let beam = GaussianBeam {
            direction: Vector3::new(1.0, 0.0, 0.0),
            intersection: Vector3::new(0.0, 0.0, 0.0),
            e_radius,
            peak_intensity: power / (PI * e_radius.powi(2)),
        };
        assert_approx_eq!(beam.power(), power, 1e-12);

        let pos1 = Position {
            pos: Vector3::new(1.0, 0.0, 0.0),
        };
        assert_approx_eq!(
            power / (PI * e_radius.powi(2)),
            get_gaussian_beam_intensity(&beam, &pos1),
            1e-6_f64
        );

        let pos2 = Position {
            pos: Vector3::new(0.0, 1.0, 0.0),
        };
        assert_approx_eq!(
            power / (PI * e_radius.powi(2)) * (-(pos2.pos[1] / e_radius).powi(2)).exp(),
            get_gaussian_beam_intensity(&beam, &pos2),
            1e-6_f64
        );
    }

    #[test]
    fn test_plane_wave_intensity_is_uniform() {
        let transition = crate::species::Isotope::Potassium39
            .structure()
            .cooling_transition();
        let beam = GaussianBeam::from_saturation_parameter(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 2.0),
            3.0,
            f64::INFINITY,
            &transition,
        );
        assert_approx_eq!(beam.direction.norm(), 1.0);
        let far = Position {
            pos: Vector3::new(10.0, -5.0, 1.0),
        };
        assert_approx_eq!(
            get_gaussian_beam_intensity(&beam, &far),
            3.0 * transition.saturation_intensity
        );
    }
}
