//! Integration tests for the rate equation approach
//!
//! This module tests the rate equation implementation by comparison to the exact analytic
//! results for a single beam, and checks the symmetry of a 1D optical molasses.

#[cfg(test)]
pub mod tests {
    use crate::evaluator::{EffectFlags, ForceProfileGenerator, RateEquationEvaluator};
    use crate::grid::Grid;
    use crate::laser::beams::{BeamGeometry, BeamParameters, BeamSet};
    use crate::laser::gaussian::GaussianBeam;
    use crate::laser_cooling::CoolingLight;
    use crate::magnetic::FieldConfiguration;
    use crate::species::Isotope;
    use crate::sweep::NoProgress;
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::Vector3;

    #[test]
    fn single_beam_force_v_detuning() {
        test_single_beam_force(1.0, -2.0);
        test_single_beam_force(1.0, -1.0);
        test_single_beam_force(1.0, 0.0);
        test_single_beam_force(1.0, 1.0);
        test_single_beam_force(1.0, 2.0);
    }

    #[test]
    fn single_beam_force_v_intensity() {
        test_single_beam_force(1.0, 0.0);
        test_single_beam_force(2.0, 0.0);
        test_single_beam_force(3.0, 0.0);
        test_single_beam_force(4.0, 0.0);
        test_single_beam_force(5.0, 0.0);
    }

    /// Calculates the force from a single beam at given intensity and detuning, and compares that to analytic theory.
    fn test_single_beam_force(i_over_i_sat: f64, delta_over_gamma: f64) {
        let isotope = Isotope::Potassium39;
        let transition = isotope.structure().cooling_transition();
        let gamma = transition.gamma();
        let delta = delta_over_gamma * gamma;
        let detuning_megahz = delta / (2.0 * std::f64::consts::PI * 1.0e6);

        let beams = BeamSet {
            beams: vec![(
                CoolingLight::for_transition(&transition, detuning_megahz, 1),
                GaussianBeam::from_saturation_parameter(
                    Vector3::new(0.0, 0.0, 0.0),
                    Vector3::new(-1.0, 0.0, 0.0),
                    i_over_i_sat,
                    f64::INFINITY,
                    &transition,
                ),
            )],
        };
        let mut evaluator = RateEquationEvaluator::new(
            isotope,
            &beams,
            &FieldConfiguration::None,
            EffectFlags::default(),
        );
        let grid = Grid::new(Vector3::x(), vec![0.0], vec![0.0]).unwrap();
        let profile = evaluator
            .generate_force_profile("single", &grid, &mut NoProgress)
            .unwrap();

        let expected_scattered = analytic_scattering_rate(i_over_i_sat, delta, gamma);
        assert_approx_eq!(
            profile.scattering_rate[0],
            expected_scattered,
            expected_scattered.abs() * 1e-6
        );

        let photon_momentum = crate::constant::HBAR * transition.wavenumber();
        let analytic_force = expected_scattered * photon_momentum;
        let measured_force = profile.force(0, 0);
        assert_approx_eq!(measured_force[0], -analytic_force, analytic_force.abs() * 1e-4);
        assert_approx_eq!(measured_force[1], 0.0);
        assert_approx_eq!(measured_force[2], 0.0);
    }

    /// Analytic scattering rate for a two-level system, in photons/s.
    fn analytic_scattering_rate(i_over_i_sat: f64, delta: f64, gamma: f64) -> f64 {
        (gamma / 2.0) * i_over_i_sat / (1.0 + i_over_i_sat + 4.0 * (delta / gamma).powi(2))
    }

    fn molasses_profile(
        isotope: Isotope,
        field: FieldConfiguration,
        velocities: Vec<f64>,
    ) -> Vec<f64> {
        let transition = isotope.structure().cooling_transition();
        let beams = BeamSet::build(
            &BeamGeometry::Molasses1d {
                axis: [0.0, 0.0, 1.0],
            },
            &transition,
            &BeamParameters {
                detuning: -1.0,
                saturation: 0.5,
                e_radius: f64::INFINITY,
            },
            &[1, 1],
        )
        .unwrap();
        let mut evaluator =
            RateEquationEvaluator::new(isotope, &beams, &field, EffectFlags::default());
        let grid = Grid::velocity_sweep(velocities).unwrap();
        let profile = evaluator
            .generate_force_profile("molasses", &grid, &mut NoProgress)
            .unwrap();
        profile.along_axis().row(0).iter().cloned().collect()
    }

    #[test]
    fn red_detuned_molasses_opposes_velocity() {
        let velocities = vec![-2.0, -0.5, -0.01, 0.01, 0.5, 2.0];
        for &isotope in Isotope::ALL.iter() {
            let forces = molasses_profile(isotope, FieldConfiguration::None, velocities.clone());
            for (v, f) in velocities.iter().zip(forces.iter()) {
                assert!(v * f < 0.0, "{}: v = {}, f = {}", isotope, v, f);
            }
            // antisymmetric in v without a field
            for n in 0..3 {
                assert_approx_eq!(forces[n], -forces[5 - n], forces[n].abs() * 1e-12);
            }
        }
    }

    #[test]
    fn molasses_force_vanishes_at_rest() {
        let forces = molasses_profile(Isotope::Potassium39, FieldConfiguration::None, vec![0.0]);
        assert_approx_eq!(forces[0], 0.0, 1e-30);
    }

    #[test]
    fn uniform_field_breaks_symmetry() {
        let velocities = vec![-0.5, 0.5];
        let field = FieldConfiguration::Uniform {
            gauss: [0.0, 0.0, 5.0],
        };
        let forces = molasses_profile(Isotope::Potassium39, field, velocities);
        assert!((forces[0] + forces[1]).abs() > 1e-3 * forces[0].abs());
    }
}
