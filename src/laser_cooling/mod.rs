//! Systems and components for calculating optical scattering forces with a two-level
//! rate-equation model.
//!
//! The systems run once per evaluation, in the order
//! doppler shift → zeeman shift → detuning → rate coefficients → populations → force.

use crate::constant;
use serde::{Deserialize, Serialize};
use specs::{Component, DispatcherBuilder, HashMapStorage, World, WorldExt};
use transition::AtomicTransition;

pub mod doppler;
pub mod force;
pub mod rate;
pub mod sampler;
pub mod transition;
pub mod twolevel;
pub mod zeeman;

/// A component representing light properties used for laser cooling.
///
/// Holds information about polarization and wavelength
/// and works as a marker for all laser cooling processes.
#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
pub struct CoolingLight {
    /// Polarisation of the laser light, 1 for +, -1 for -,
    ///
    /// Note that the polarization is defined by the quantization vector (e.g. magnetic field)
    /// and not (always) in direction of the wavevector.
    pub polarization: i32,

    /// wavelength of the laser light, in SI units of m.
    pub wavelength: f64,
}

impl Component for CoolingLight {
    type Storage = HashMapStorage<Self>;
}

impl CoolingLight {
    /// Frequency of the cooling light in units of Hz
    pub fn frequency(&self) -> f64 {
        constant::C / self.wavelength
    }

    /// Wavenumber of the cooling light, in units of 2pi inverse metres.
    pub fn wavenumber(&self) -> f64 {
        2.0 * constant::PI / self.wavelength
    }

    /// Creates a `CoolingLight` component for the given transition.
    ///
    /// # Arguments
    ///
    /// * `transition`: The atomic transition to take the base wavelength from.
    ///
    /// * `detuning`: Detuning of the laser from transition in units of MHz
    ///
    /// * `polarization`: Polarization of the cooling beam.
    pub fn for_transition(transition: &AtomicTransition, detuning: f64, polarization: i32) -> Self {
        let freq = transition.frequency + detuning * 1.0e6;
        CoolingLight {
            wavelength: constant::C / freq,
            polarization,
        }
    }
}

pub const DOPPLER_SHIFT_SYSTEM_NAME: &str = "calculate_doppler_shift";
pub const ZEEMAN_SHIFT_SYSTEM_NAME: &str = "calculate_zeeman_shift";
pub const LASER_DETUNING_SYSTEM_NAME: &str = "calculate_laser_detuning";
pub const RATE_COEFFICIENTS_SYSTEM_NAME: &str = "calculate_rate_coefficients";
pub const TWOLEVEL_POPULATION_SYSTEM_NAME: &str = "calculate_twolevel_population";
pub const SCATTERING_FORCE_SYSTEM_NAME: &str = "calculate_scattering_force";

/// Adds the systems required by laser cooling to the dispatcher.
///
/// #Arguments
///
/// `builder`: the dispatch builder to modify
///
/// `deps`: any dependencies that must be completed before the force system runs,
/// e.g. clearing the forces.
pub fn add_systems_to_dispatch(builder: &mut DispatcherBuilder<'static, 'static>, deps: &[&str]) {
    builder.add(
        doppler::CalculateDopplerShiftSystem,
        DOPPLER_SHIFT_SYSTEM_NAME,
        &[crate::laser::INDEX_LASERS_SYSTEM_NAME],
    );
    builder.add(
        zeeman::CalculateZeemanShiftSystem,
        ZEEMAN_SHIFT_SYSTEM_NAME,
        &[crate::magnetic::MAGNETIC_MAGNITUDE_SYSTEM_NAME],
    );
    builder.add(
        sampler::CalculateLaserDetuningSystem,
        LASER_DETUNING_SYSTEM_NAME,
        &[DOPPLER_SHIFT_SYSTEM_NAME, ZEEMAN_SHIFT_SYSTEM_NAME],
    );
    builder.add(
        rate::CalculateRateCoefficientsSystem,
        RATE_COEFFICIENTS_SYSTEM_NAME,
        &[
            LASER_DETUNING_SYSTEM_NAME,
            crate::laser::SAMPLE_INTENSITY_SYSTEM_NAME,
        ],
    );
    builder.add(
        twolevel::CalculateTwoLevelPopulationSystem,
        TWOLEVEL_POPULATION_SYSTEM_NAME,
        &[RATE_COEFFICIENTS_SYSTEM_NAME],
    );
    let mut force_deps = vec![TWOLEVEL_POPULATION_SYSTEM_NAME];
    force_deps.extend_from_slice(deps);
    builder.add(
        force::CalculateScatteringForceSystem,
        SCATTERING_FORCE_SYSTEM_NAME,
        &force_deps,
    );
}

/// Registers components required by laser cooling to the ecs world.
pub fn register_components(world: &mut World) {
    world.register::<CoolingLight>();
    world.register::<doppler::DopplerShiftSamplers>();
    world.register::<zeeman::ZeemanShiftSampler>();
    world.register::<sampler::LaserDetuningSamplers>();
    world.register::<rate::RateCoefficients>();
    world.register::<twolevel::TwoLevelPopulation>();
}
