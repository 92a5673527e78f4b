//! Calculation of [RateCoefficients] used in the rate equation formalism of laser cooling.

use super::sampler::LaserDetuningSamplers;
use super::transition::AtomicTransition;
use super::CoolingLight;
use crate::laser::gaussian::GaussianBeam;
use crate::laser::index::LaserIndex;
use crate::laser::intensity::LaserIntensitySamplers;
use crate::magnetic::MagneticFieldSampler;
use specs::{Component, Join, ReadExpect, ReadStorage, System, VecStorage, WriteStorage};

/// Represents the rate coefficient of the sampler with respect to a specific [CoolingLight] entity
#[derive(Clone, Copy, Debug)]
pub struct RateCoefficient {
    /// rate coefficient in Hz
    pub rate: f64,
}

impl Default for RateCoefficient {
    fn default() -> Self {
        RateCoefficient { rate: f64::NAN }
    }
}

/// Component that holds a Vector of `RateCoefficient`
#[derive(Clone, Default, Debug)]
pub struct RateCoefficients {
    /// Vector of `RateCoefficient` where each entry corresponds to a different CoolingLight entity
    pub contents: Vec<RateCoefficient>,
}

impl Component for RateCoefficients {
    type Storage = VecStorage<Self>;
}

impl RateCoefficients {
    /// Sum of the rate coefficients of all beams, Hz.
    pub fn total(&self) -> f64 {
        self.contents.iter().map(|coefficient| coefficient.rate).sum()
    }
}

/// Rate coefficient of a single beam on a two-level transition.
///
/// The polarization is projected onto the quantization axis given by the local magnetic
/// field. `costheta` is the cosine of the angle between beam and field; for fully
/// polarized light the three projection pre-factors add up to 1.
pub fn rate_coefficient(
    transition: &AtomicTransition,
    intensity: f64,
    polarization: i32,
    costheta: f64,
    detuning_sigma_plus: f64,
    detuning_sigma_minus: f64,
    detuning_pi: f64,
) -> f64 {
    let prefactor = transition.rate_prefactor() * intensity;
    let half_gamma_squared = (transition.gamma() / 2.0).powi(2);
    let polarization = polarization as f64;

    let scatter1 = 0.25 * (polarization * costheta + 1.).powi(2) * prefactor
        / (detuning_sigma_plus.powi(2) + half_gamma_squared);
    let scatter2 = 0.25 * (polarization * costheta - 1.).powi(2) * prefactor
        / (detuning_sigma_minus.powi(2) + half_gamma_squared);
    let scatter3 =
        0.5 * (1. - costheta.powi(2)) * prefactor / (detuning_pi.powi(2) + half_gamma_squared);
    scatter1 + scatter2 + scatter3
}

/// Calculates the TwoLevel approach rate coefficients for all samplers for all
/// CoolingLight entities
///
/// The Rate can be calculated by: Intensity * Absorption_Cross_Section / Photon_Energy
pub struct CalculateRateCoefficientsSystem;

impl<'a> System<'a> for CalculateRateCoefficientsSystem {
    type SystemData = (
        ReadStorage<'a, CoolingLight>,
        ReadStorage<'a, LaserIndex>,
        ReadStorage<'a, GaussianBeam>,
        ReadStorage<'a, LaserDetuningSamplers>,
        ReadStorage<'a, LaserIntensitySamplers>,
        ReadStorage<'a, MagneticFieldSampler>,
        WriteStorage<'a, RateCoefficients>,
        ReadExpect<'a, AtomicTransition>,
    );

    fn run(
        &mut self,
        (
            cooling,
            indices,
            gaussian,
            detunings,
            intensities,
            bfields,
            mut rate_coefficients,
            transition,
        ): Self::SystemData,
    ) {
        use rayon::prelude::*;
        use specs::ParJoin;

        let transition = *transition;
        let lasers: Vec<(CoolingLight, LaserIndex, GaussianBeam)> =
            (&cooling, &indices, &gaussian)
                .join()
                .map(|(cooling, index, gaussian)| (*cooling, *index, *gaussian))
                .collect();
        let number = lasers.len();

        (&detunings, &intensities, &bfields, &mut rate_coefficients)
            .par_join()
            .for_each(|(detunings, intensities, bfield, rates)| {
                rates.contents = vec![RateCoefficient::default(); number];
                for (cooling, index, gaussian) in lasers.iter() {
                    let beam_direction_vector = gaussian.direction.normalize();
                    let costheta = if bfield.field.norm_squared() < (10.0 * f64::EPSILON) {
                        0.0
                    } else {
                        beam_direction_vector.dot(&bfield.field.normalize())
                    };
                    let detuning = detunings.contents[index.index];
                    rates.contents[index.index].rate = rate_coefficient(
                        &transition,
                        intensities.contents[index.index].intensity,
                        cooling.polarization,
                        costheta,
                        detuning.detuning_sigma_plus,
                        detuning.detuning_sigma_minus,
                        detuning.detuning_pi,
                    );
                }
            });
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::laser::intensity::LaserIntensitySampler;
    use crate::laser_cooling::sampler::LaserDetuningSampler;
    use crate::species::Isotope;
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::Vector3;
    use specs::prelude::*;

    /// Tests the correct implementation of the `RateCoefficients`
    #[test]
    fn test_calculate_rate_coefficients_system() {
        let transition = Isotope::Potassium39.structure().cooling_transition();
        let mut test_world = World::new();
        test_world.register::<LaserIndex>();
        test_world.register::<CoolingLight>();
        test_world.register::<GaussianBeam>();
        test_world.register::<LaserDetuningSamplers>();
        test_world.register::<LaserIntensitySamplers>();
        test_world.register::<MagneticFieldSampler>();
        test_world.register::<RateCoefficients>();
        test_world.insert(transition);

        test_world
            .create_entity()
            .with(CoolingLight {
                polarization: 1,
                wavelength: transition.wavelength(),
            })
            .with(LaserIndex {
                index: 0,
                initiated: true,
            })
            .with(GaussianBeam {
                direction: Vector3::new(1.0, 0.0, 0.0),
                intersection: Vector3::new(0.0, 0.0, 0.0),
                e_radius: 2.0,
                peak_intensity: 1.0,
            })
            .build();

        let detuning = -1.0e7;
        let intensity = 1.0;
        let atom1 = test_world
            .create_entity()
            .with(LaserDetuningSamplers {
                contents: vec![LaserDetuningSampler {
                    detuning_sigma_plus: detuning,
                    detuning_sigma_minus: detuning,
                    detuning_pi: detuning,
                }],
            })
            .with(LaserIntensitySamplers {
                contents: vec![LaserIntensitySampler { intensity }],
            })
            .with(MagneticFieldSampler::tesla(Vector3::new(0.0, 0.0, 1.0)))
            .with(RateCoefficients::default())
            .build();

        CalculateRateCoefficientsSystem.run_now(&test_world);
        test_world.maintain();

        let man_pref = transition.rate_prefactor() * intensity;
        let denominator = detuning.powi(2) + (transition.gamma() / 2.).powi(2);
        let scatter1 = 0.25 * man_pref / denominator;
        let scatter2 = 0.25 * man_pref / denominator;
        let scatter3 = 0.5 * man_pref / denominator;

        let storage = test_world.read_storage::<RateCoefficients>();
        let rates = storage.get(atom1).expect("entity not found");
        assert_approx_eq!(
            rates.contents[0].rate,
            scatter1 + scatter2 + scatter3,
            1e-5_f64
        );
        assert_approx_eq!(rates.total(), rates.contents[0].rate);
    }

    #[test]
    fn test_beam_along_field_drives_only_matching_sigma() {
        let transition = Isotope::Potassium39.structure().cooling_transition();
        // sigma_+ light along the field: only the sigma_+ detuning contributes.
        let rate = rate_coefficient(&transition, 1.0, 1, 1.0, 0.0, 1.0e12, 1.0e12);
        let expected = transition.rate_prefactor() / (transition.gamma() / 2.0).powi(2);
        assert_approx_eq!(rate, expected, expected * 1e-6);
    }
}
