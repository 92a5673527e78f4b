//! Conversion between SI and the natural units of a laser cooling transition.
//!
//! In natural units lengths are measured in `1/k`, velocities in `Gamma/k`, times in
//! `1/Gamma` and forces in `hbar k Gamma`.

use crate::constant::HBAR;
use crate::laser_cooling::transition::AtomicTransition;
use serde::{Deserialize, Serialize};

/// The unit system that grid values and exported results are expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    Si,
    Natural,
}

impl Default for UnitSystem {
    fn default() -> Self {
        UnitSystem::Si
    }
}

/// Scales of the natural unit system, each given in SI units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NaturalUnits {
    /// `1/k`, m
    pub length: f64,
    /// `Gamma/k`, m/s
    pub velocity: f64,
    /// `1/Gamma`, s
    pub time: f64,
    /// `hbar k Gamma`, N
    pub force: f64,
}

impl NaturalUnits {
    pub fn for_transition(transition: &AtomicTransition) -> Self {
        let k = transition.wavenumber();
        let gamma = transition.gamma();
        NaturalUnits {
            length: 1.0 / k,
            velocity: gamma / k,
            time: 1.0 / gamma,
            force: HBAR * k * gamma,
        }
    }

    /// Scale factors `(length, velocity, force)` that map values in `system` to SI.
    pub fn scales(&self, system: UnitSystem) -> (f64, f64, f64) {
        match system {
            UnitSystem::Si => (1.0, 1.0, 1.0),
            UnitSystem::Natural => (self.length, self.velocity, self.force),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::species::Isotope;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_natural_units_k39() {
        let transition = Isotope::Potassium39.structure().cooling_transition();
        let units = NaturalUnits::for_transition(&transition);
        // Gamma/k = 2 pi * 6.035 MHz * 766.7 nm / (2 pi) = 4.63 m/s
        assert_approx_eq!(units.velocity, 4.627, 1e-3);
        assert_approx_eq!(units.length * units.time.recip(), units.velocity, 1e-9);
        assert_eq!(units.scales(UnitSystem::Si), (1.0, 1.0, 1.0));
    }
}
