//! Calculation of the mean scattering force exerted on the samplers by the CoolingLight entities

use super::rate::RateCoefficients;
use super::transition::AtomicTransition;
use super::twolevel::TwoLevelPopulation;
use super::CoolingLight;
use crate::atom::Force;
use crate::constant::HBAR;
use crate::laser::gaussian::GaussianBeam;
use crate::laser::index::LaserIndex;
use specs::{Join, ReadExpect, ReadStorage, System, WriteStorage};

/// This sytem calculates the steady-state radiation pressure force from the CoolingLight entities.
///
/// The total photon scattering rate `gamma * excited` is shared between the beams in
/// proportion to their rate coefficients, and each scattered photon transfers the
/// momentum `hbar k` of the beam it was absorbed from. Spontaneous emission averages to
/// zero and is not included.
pub struct CalculateScatteringForceSystem;

impl<'a> System<'a> for CalculateScatteringForceSystem {
    type SystemData = (
        ReadStorage<'a, CoolingLight>,
        ReadStorage<'a, LaserIndex>,
        ReadStorage<'a, GaussianBeam>,
        ReadStorage<'a, RateCoefficients>,
        ReadStorage<'a, TwoLevelPopulation>,
        WriteStorage<'a, Force>,
        ReadExpect<'a, AtomicTransition>,
    );

    fn run(
        &mut self,
        (
            cooling,
            indices,
            gaussian,
            rate_coefficients,
            populations,
            mut forces,
            transition,
        ): Self::SystemData,
    ) {
        use rayon::prelude::*;
        use specs::ParJoin;

        let gamma = transition.gamma();
        let lasers: Vec<(CoolingLight, LaserIndex, GaussianBeam)> =
            (&cooling, &indices, &gaussian)
                .join()
                .map(|(cooling, index, gaussian)| (*cooling, *index, *gaussian))
                .collect();

        (&rate_coefficients, &populations, &mut forces)
            .par_join()
            .for_each(|(rates, population, force)| {
                let total = rates.total();
                if total <= 0.0 {
                    return;
                }
                let scattering_rate = gamma * population.excited;
                for (cooling, index, gaussian) in lasers.iter() {
                    let share = rates.contents[index.index].rate / total;
                    force.force += scattering_rate
                        * share
                        * HBAR
                        * cooling.wavenumber()
                        * gaussian.direction.normalize();
                }
            });
    }
}
