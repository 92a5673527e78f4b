//! Shift in the transition frequency due to a magnetic field (zeeman effect)

use super::transition::AtomicTransition;
use crate::constant::HBAR;
use crate::magnetic::MagneticFieldSampler;
use specs::{Component, Read, ReadExpect, ReadStorage, System, VecStorage, WriteStorage};

/// Represents the (angular) Zeeman shift of the sampler depending on the magnetic field it experiences
#[derive(Clone, Copy, Debug)]
pub struct ZeemanShiftSampler {
    /// Zeemanshift for sigma plus transition in rad/s
    pub sigma_plus: f64,
    /// Zeemanshift for sigma minus transition in rad/s
    pub sigma_minus: f64,
    /// Zeemanshift for pi transition in rad/s
    pub sigma_pi: f64,
}

impl Default for ZeemanShiftSampler {
    fn default() -> Self {
        ZeemanShiftSampler {
            sigma_plus: f64::NAN,
            sigma_minus: f64::NAN,
            sigma_pi: f64::NAN,
        }
    }
}

impl Component for ZeemanShiftSampler {
    type Storage = VecStorage<Self>;
}

/// A resource that selects whether magnetic fields shift the cooling transition.
///
/// With the shift switched off the field still defines the quantization axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZeemanShiftOption {
    On,
    Off,
}

impl Default for ZeemanShiftOption {
    fn default() -> Self {
        ZeemanShiftOption::On
    }
}

/// Calculates the Zeeman shift for each sampler.
pub struct CalculateZeemanShiftSystem;

impl<'a> System<'a> for CalculateZeemanShiftSystem {
    type SystemData = (
        WriteStorage<'a, ZeemanShiftSampler>,
        ReadStorage<'a, MagneticFieldSampler>,
        ReadExpect<'a, AtomicTransition>,
        Read<'a, ZeemanShiftOption>,
    );

    fn run(&mut self, (mut zeeman, fields, transition, option): Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        let transition = *transition;
        let scale = match *option {
            ZeemanShiftOption::On => 1.0,
            ZeemanShiftOption::Off => 0.0,
        };
        (&mut zeeman, &fields)
            .par_join()
            .for_each(|(zeeman, magnetic_field)| {
                let magnitude = scale * magnetic_field.magnitude;
                zeeman.sigma_plus = transition.mup / HBAR * magnitude;
                zeeman.sigma_minus = transition.mum / HBAR * magnitude;
                zeeman.sigma_pi = transition.muz / HBAR * magnitude;
            });
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::species::Isotope;
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::Vector3;
    use specs::prelude::*;

    fn run_with(option: ZeemanShiftOption) -> (ZeemanShiftSampler, AtomicTransition) {
        let transition = Isotope::Potassium39.structure().cooling_transition();
        let mut test_world = World::new();
        test_world.register::<ZeemanShiftSampler>();
        test_world.register::<MagneticFieldSampler>();
        test_world.insert(transition);
        test_world.insert(option);

        let atom = test_world
            .create_entity()
            .with(MagneticFieldSampler::tesla(Vector3::new(0.0, 0.0, 1.0)))
            .with(ZeemanShiftSampler::default())
            .build();

        CalculateZeemanShiftSystem.run_now(&test_world);
        test_world.maintain();

        let storage = test_world.read_storage::<ZeemanShiftSampler>();
        (*storage.get(atom).expect("entity not found"), transition)
    }

    #[test]
    fn test_calculate_zeeman_shift_system() {
        let (result, transition) = run_with(ZeemanShiftOption::On);
        assert_approx_eq!(result.sigma_plus, transition.mup / HBAR, 1e-5_f64);
        assert_approx_eq!(result.sigma_minus, transition.mum / HBAR, 1e-5_f64);
        assert_approx_eq!(result.sigma_pi, 0.0, 1e-5_f64);
    }

    #[test]
    fn test_zeeman_shift_can_be_disabled() {
        let (result, _) = run_with(ZeemanShiftOption::Off);
        assert_eq!(result.sigma_plus, 0.0);
        assert_eq!(result.sigma_minus, 0.0);
    }
}
