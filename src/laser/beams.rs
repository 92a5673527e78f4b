//! Construction of cooling beam sets from a beam geometry.

use super::gaussian::GaussianBeam;
use crate::error::{Error, Result};
use crate::laser_cooling::transition::AtomicTransition;
use crate::laser_cooling::CoolingLight;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Arrangement of the cooling beams around the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BeamGeometry {
    /// A counter-propagating pair along `axis`: first the beam along `+axis`, then along `-axis`.
    #[serde(rename = "molasses_1d")]
    Molasses1d { axis: [f64; 3] },
    /// Three orthogonal counter-propagating pairs, ordered `+x, -x, +y, -y, +z, -z`.
    #[serde(rename = "mot_3d")]
    Mot3d,
}

impl BeamGeometry {
    /// Propagation directions of the beams, normalised.
    pub fn directions(&self) -> Result<Vec<Vector3<f64>>> {
        match self {
            BeamGeometry::Molasses1d { axis } => {
                let axis = Vector3::new(axis[0], axis[1], axis[2]);
                if axis.norm() == 0.0 {
                    return Err(Error::ZeroAxis);
                }
                let axis = axis.normalize();
                Ok(vec![axis, -axis])
            }
            BeamGeometry::Mot3d => Ok(vec![
                Vector3::x(),
                -Vector3::x(),
                Vector3::y(),
                -Vector3::y(),
                Vector3::z(),
                -Vector3::z(),
            ]),
        }
    }

    pub fn beam_count(&self) -> usize {
        match self {
            BeamGeometry::Molasses1d { .. } => 2,
            BeamGeometry::Mot3d => 6,
        }
    }
}

/// The parameters shared by every beam of a beam set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamParameters {
    /// Detuning from resonance in units of the natural linewidth.
    pub detuning: f64,
    /// Peak intensity of each beam over the saturation intensity.
    pub saturation: f64,
    /// 1/e intensity radius of each beam, m. Infinite for plane waves.
    pub e_radius: f64,
}

/// A set of cooling beams, each a [CoolingLight] with its [GaussianBeam].
#[derive(Clone, Debug)]
pub struct BeamSet {
    pub beams: Vec<(CoolingLight, GaussianBeam)>,
}

impl BeamSet {
    /// Builds the beams of `geometry`, assigning `polarizations` to them in order.
    pub fn build(
        geometry: &BeamGeometry,
        transition: &AtomicTransition,
        parameters: &BeamParameters,
        polarizations: &[i32],
    ) -> Result<Self> {
        let directions = geometry.directions()?;
        if polarizations.len() != directions.len() {
            return Err(Error::BeamCount {
                given: polarizations.len(),
                beams: directions.len(),
            });
        }
        if !(parameters.saturation >= 0.0 && parameters.saturation.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "saturation",
                reason: format!("must be finite and non-negative, got {}", parameters.saturation),
            });
        }
        if !(parameters.e_radius > 0.0) {
            return Err(Error::InvalidParameter {
                name: "e_radius",
                reason: format!("must be positive, got {}", parameters.e_radius),
            });
        }
        if !parameters.detuning.is_finite() {
            return Err(Error::InvalidParameter {
                name: "detuning",
                reason: format!("must be finite, got {}", parameters.detuning),
            });
        }

        let detuning_megahz = parameters.detuning * transition.linewidth / 1.0e6;
        let mut beams = Vec::with_capacity(directions.len());
        for (direction, &polarization) in directions.into_iter().zip(polarizations) {
            if polarization != 1 && polarization != -1 {
                return Err(Error::InvalidPolarization(polarization));
            }
            beams.push((
                CoolingLight::for_transition(transition, detuning_megahz, polarization),
                GaussianBeam::from_saturation_parameter(
                    Vector3::new(0.0, 0.0, 0.0),
                    direction,
                    parameters.saturation,
                    parameters.e_radius,
                    transition,
                ),
            ));
        }
        Ok(BeamSet { beams })
    }

    pub fn len(&self) -> usize {
        self.beams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::species::Isotope;
    use assert_approx_eq::assert_approx_eq;

    fn parameters() -> BeamParameters {
        BeamParameters {
            detuning: -2.0,
            saturation: 1.5,
            e_radius: f64::INFINITY,
        }
    }

    #[test]
    fn test_molasses_beams_counter_propagate() {
        let transition = Isotope::Potassium39.structure().cooling_transition();
        let set = BeamSet::build(
            &BeamGeometry::Molasses1d {
                axis: [0.0, 0.0, 3.0],
            },
            &transition,
            &parameters(),
            &[1, -1],
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        let (light_a, beam_a) = set.beams[0];
        let (light_b, beam_b) = set.beams[1];
        assert_approx_eq!(beam_a.direction[2], 1.0);
        assert_approx_eq!(beam_b.direction[2], -1.0);
        assert_eq!(light_a.polarization, 1);
        assert_eq!(light_b.polarization, -1);
        assert_approx_eq!(
            light_a.frequency() - transition.frequency,
            -2.0 * transition.linewidth,
            1.0
        );
        assert_approx_eq!(beam_a.peak_intensity, 1.5 * transition.saturation_intensity);
    }

    #[test]
    fn test_mot_beams_cover_all_axes() {
        let directions = BeamGeometry::Mot3d.directions().unwrap();
        assert_eq!(directions.len(), BeamGeometry::Mot3d.beam_count());
        let sum = directions
            .iter()
            .fold(Vector3::new(0.0, 0.0, 0.0), |acc, d| acc + d);
        assert_approx_eq!(sum.norm(), 0.0);
    }

    #[test]
    fn test_polarization_count_must_match() {
        let transition = Isotope::Potassium40.structure().cooling_transition();
        let result = BeamSet::build(&BeamGeometry::Mot3d, &transition, &parameters(), &[1, -1]);
        match result {
            Err(error @ Error::BeamCount { .. }) => {
                assert!(matches!(error, Error::BeamCount { given: 2, beams: 6 }));
                assert_eq!(error.to_string(), "2 polarizations given for 6 beams");
            }
            _ => panic!("expected a beam count error"),
        }
    }

    #[test]
    fn test_geometry_from_yaml() {
        let geometry: BeamGeometry = serde_yaml::from_str("kind: mot_3d").unwrap();
        assert_eq!(geometry, BeamGeometry::Mot3d);
        let geometry: BeamGeometry =
            serde_yaml::from_str("kind: molasses_1d\naxis: [1.0, 0.0, 0.0]").unwrap();
        assert_eq!(geometry.beam_count(), 2);
    }

    #[test]
    fn test_zero_axis_is_rejected() {
        let geometry = BeamGeometry::Molasses1d {
            axis: [0.0, 0.0, 0.0],
        };
        assert!(matches!(geometry.directions(), Err(Error::ZeroAxis)));
    }
}
