//! Calculation of the total detuning for each sampler and CoolingLight entity

use super::doppler::DopplerShiftSamplers;
use super::transition::AtomicTransition;
use super::zeeman::ZeemanShiftSampler;
use super::CoolingLight;
use crate::constant;
use crate::laser::index::LaserIndex;
use specs::{Component, Join, ReadExpect, ReadStorage, System, VecStorage, WriteStorage};

/// Represents total detuning of the sampler's transition with respect to each beam
#[derive(Clone, Copy, Debug)]
pub struct LaserDetuningSampler {
    /// Laser detuning of the sigma plus transition with respect to laser beam, in SI units of rad/s
    pub detuning_sigma_plus: f64,
    /// Laser detuning of the sigma minus transition with respect to laser beam, in SI units of rad/s
    pub detuning_sigma_minus: f64,
    /// Laser detuning of the pi transition with respect to laser beam, in SI units of rad/s
    pub detuning_pi: f64,
}

impl Default for LaserDetuningSampler {
    fn default() -> Self {
        LaserDetuningSampler {
            detuning_sigma_plus: f64::NAN,
            detuning_sigma_minus: f64::NAN,
            detuning_pi: f64::NAN,
        }
    }
}

/// Component that holds a vector of `LaserDetuningSampler`
#[derive(Clone, Default, Debug)]
pub struct LaserDetuningSamplers {
    /// List of `LaserDetuningSampler`s
    pub contents: Vec<LaserDetuningSampler>,
}

impl Component for LaserDetuningSamplers {
    type Storage = VecStorage<Self>;
}

/// Calculates the total laser detuning for each sampler with respect to each [CoolingLight].
pub struct CalculateLaserDetuningSystem;

impl<'a> System<'a> for CalculateLaserDetuningSystem {
    type SystemData = (
        ReadStorage<'a, CoolingLight>,
        ReadStorage<'a, LaserIndex>,
        ReadStorage<'a, DopplerShiftSamplers>,
        ReadStorage<'a, ZeemanShiftSampler>,
        WriteStorage<'a, LaserDetuningSamplers>,
        ReadExpect<'a, AtomicTransition>,
    );

    fn run(
        &mut self,
        (
            cooling,
            indices,
            doppler_samplers,
            zeeman_samplers,
            mut detuning_samplers,
            transition,
        ): Self::SystemData,
    ) {
        use rayon::prelude::*;
        use specs::ParJoin;

        let transition = *transition;
        let lasers: Vec<(LaserIndex, CoolingLight)> = (&indices, &cooling)
            .join()
            .map(|(index, cooling)| (*index, *cooling))
            .collect();
        let number = lasers.len();

        (&mut detuning_samplers, &doppler_samplers, &zeeman_samplers)
            .par_join()
            .for_each(|(detuning_sampler, doppler_samplers, zeeman_sampler)| {
                detuning_sampler.contents = vec![LaserDetuningSampler::default(); number];
                for (index, cooling) in lasers.iter() {
                    let without_zeeman = 2.0
                        * constant::PI
                        * (constant::C / cooling.wavelength - transition.frequency)
                        - doppler_samplers.contents[index.index].doppler_shift;

                    let detuning = &mut detuning_sampler.contents[index.index];
                    detuning.detuning_sigma_plus = without_zeeman - zeeman_sampler.sigma_plus;
                    detuning.detuning_sigma_minus = without_zeeman - zeeman_sampler.sigma_minus;
                    detuning.detuning_pi = without_zeeman - zeeman_sampler.sigma_pi;
                }
            });
    }
}
