//! Calculations of the Doppler shift.

use super::CoolingLight;
use crate::atom::Velocity;
use crate::laser::gaussian::GaussianBeam;
use crate::laser::index::LaserIndex;
use specs::{Component, Join, ReadStorage, System, VecStorage, WriteStorage};

/// Represents the Dopplershift of the sampler with respect to each beam due to its velocity
#[derive(Clone, Copy, Debug)]
pub struct DopplerShiftSampler {
    /// Doppler shift with respect to laser beam, in SI units of rad/s.
    pub doppler_shift: f64,
}

impl Default for DopplerShiftSampler {
    fn default() -> Self {
        DopplerShiftSampler {
            doppler_shift: f64::NAN,
        }
    }
}

/// Component that holds a list of [DopplerShiftSampler]s
///
/// Each list entry corresponds to the detuning with respect to a [CoolingLight] entity
/// and indexed via their [LaserIndex].
#[derive(Clone, Default, Debug)]
pub struct DopplerShiftSamplers {
    /// List of all `DopplerShiftSampler`s
    pub contents: Vec<DopplerShiftSampler>,
}

impl Component for DopplerShiftSamplers {
    type Storage = VecStorage<Self>;
}

/// This system calculates the Doppler shift for each sampler in each cooling beam.
///
/// The result is stored in `DopplerShiftSamplers`
pub struct CalculateDopplerShiftSystem;

impl<'a> System<'a> for CalculateDopplerShiftSystem {
    type SystemData = (
        ReadStorage<'a, CoolingLight>,
        ReadStorage<'a, LaserIndex>,
        ReadStorage<'a, GaussianBeam>,
        WriteStorage<'a, DopplerShiftSamplers>,
        ReadStorage<'a, Velocity>,
    );

    fn run(&mut self, (cooling, indices, gaussian, mut samplers, velocities): Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        // There are typically only a small number of lasers in a simulation.
        // For a speedup, cache the required components into thread memory,
        // so they can be distributed to parallel workers during the sampler loop.
        let lasers: Vec<(CoolingLight, LaserIndex, GaussianBeam)> =
            (&cooling, &indices, &gaussian)
                .join()
                .map(|(cooling, index, gaussian)| (*cooling, *index, *gaussian))
                .collect();
        let number = lasers.len();

        (&mut samplers, &velocities)
            .par_join()
            .for_each(|(sampler, vel)| {
                sampler.contents = vec![DopplerShiftSampler::default(); number];
                for (cooling, index, gaussian) in lasers.iter() {
                    sampler.contents[index.index].doppler_shift = vel
                        .vel
                        .dot(&(gaussian.direction.normalize() * cooling.wavenumber()));
                }
            });
    }
}
