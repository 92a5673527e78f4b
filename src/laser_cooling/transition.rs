//! The effective two-level transition used for laser cooling.

use crate::constant;
use serde::{Deserialize, Serialize};

/// Physical constants of an atomic transition used for laser cooling.
///
/// The transition is inserted into the simulation world as a resource, so all sample
/// points of one force profile share it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AtomicTransition {
    /// The dependence of the sigma_+ transition on magnetic fields.
    /// The sigma_+ transition is shifted by `mup * field.magnitude / h` Hz.
    /// The units of mup are of Energy per magnetic field, ie Joules/Tesla.
    pub mup: f64,
    /// The dependence of the sigma_- transition on magnetic fields, Joules/Tesla.
    pub mum: f64,
    /// The dependence of the sigma_pi transition on magnetic fields, Joules/Tesla.
    pub muz: f64,
    /// Frequency of the laser cooling transition, Hz.
    pub frequency: f64,
    /// Linewidth of the laser cooling transition, Hz
    pub linewidth: f64,
    /// Saturation intensity, in units of W/m^2.
    pub saturation_intensity: f64,
}

impl AtomicTransition {
    /// Natural linewidth in angular units, rad/s.
    pub fn gamma(&self) -> f64 {
        self.linewidth * 2.0 * constant::PI
    }

    /// Precalculated prefactor used in the determination of rate coefficients.
    pub fn rate_prefactor(&self) -> f64 {
        self.gamma().powi(3) / (self.saturation_intensity * 8.0)
    }

    /// Wavelength of resonant light, m.
    pub fn wavelength(&self) -> f64 {
        constant::C / self.frequency
    }

    /// Wavenumber of resonant light, in units of 2pi inverse metres.
    pub fn wavenumber(&self) -> f64 {
        2.0 * constant::PI / self.wavelength()
    }
}
