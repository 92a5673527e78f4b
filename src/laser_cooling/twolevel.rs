//! Calculation of the steady-state twolevel populations

use super::rate::RateCoefficients;
use super::transition::AtomicTransition;
use specs::{Component, ReadExpect, ReadStorage, System, VecStorage, WriteStorage};

/// Represents the steady-state population density of the excited state and ground state
#[derive(Clone, Copy, Debug)]
pub struct TwoLevelPopulation {
    /// steady-state population density of the ground state, a number in [0,1]
    pub ground: f64,
    /// steady-state population density of the excited state, a number in [0,1]
    pub excited: f64,
}

impl Default for TwoLevelPopulation {
    fn default() -> Self {
        TwoLevelPopulation {
            ground: f64::NAN,
            excited: f64::NAN,
        }
    }
}

impl TwoLevelPopulation {
    /// Calculate the ground state population from excited state population
    pub fn calculate_ground_state(&mut self) {
        self.ground = 1. - self.excited;
    }

    /// Steady-state excited population for a total rate coefficient `sum_rates` (Hz) on a
    /// transition of angular linewidth `gamma`.
    pub fn steady_state_excited(sum_rates: f64, gamma: f64) -> f64 {
        sum_rates / (gamma + 2. * sum_rates)
    }
}

impl Component for TwoLevelPopulation {
    type Storage = VecStorage<Self>;
}

/// Calculates the TwoLevelPopulation from the natural linewidth and the `RateCoefficients`
pub struct CalculateTwoLevelPopulationSystem;

impl<'a> System<'a> for CalculateTwoLevelPopulationSystem {
    type SystemData = (
        ReadStorage<'a, RateCoefficients>,
        WriteStorage<'a, TwoLevelPopulation>,
        ReadExpect<'a, AtomicTransition>,
    );

    fn run(&mut self, (rate_coefficients, mut twolevel_population, transition): Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        let gamma = transition.gamma();
        (&rate_coefficients, &mut twolevel_population)
            .par_join()
            .for_each(|(rates, twolevel)| {
                twolevel.excited =
                    TwoLevelPopulation::steady_state_excited(rates.total(), gamma);
                twolevel.calculate_ground_state();
            });
    }
}
