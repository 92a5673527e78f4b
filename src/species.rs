//! Atomic data for the potassium isotopes, looked up by label.
//!
//! Values for the D2 line are taken from T. G. Tiecke, "Properties of Potassium".

use crate::constant::BOHRMAG;
use crate::error::{Error, Result};
use crate::laser_cooling::transition::AtomicTransition;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Potassium isotopes with data available for the D2 cooling line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Isotope {
    Potassium39,
    Potassium40,
    Potassium41,
}

impl Isotope {
    pub const ALL: [Isotope; 3] = [
        Isotope::Potassium39,
        Isotope::Potassium40,
        Isotope::Potassium41,
    ];

    /// Mass number of the isotope.
    pub fn mass_number(&self) -> u32 {
        match self {
            Isotope::Potassium39 => 39,
            Isotope::Potassium40 => 40,
            Isotope::Potassium41 => 41,
        }
    }

    /// Level structure and D2 line data of the isotope.
    pub fn structure(&self) -> AtomicStructure {
        match self {
            Isotope::Potassium39 => AtomicStructure {
                isotope: *self,
                mass: 38.963_706_68,
                nuclear_spin: 1.5,
                j_ground: 0.5,
                j_excited: 1.5,
                gj_ground: 2.002_294_21,
                gj_excited: 1.3341,
                a_ground: 230.859_860_1e6,
                a_excited: 6.093e6,
                b_excited: 2.786e6,
                frequency: 391_016_170_030_000.0,
                linewidth: 6.035e6,
                saturation_intensity: 17.5,
            },
            Isotope::Potassium40 => AtomicStructure {
                isotope: *self,
                mass: 39.963_998_48,
                nuclear_spin: 4.0,
                j_ground: 0.5,
                j_excited: 1.5,
                gj_ground: 2.002_294_21,
                gj_excited: 1.3341,
                a_ground: -285.730_8e6,
                a_excited: -7.585e6,
                b_excited: -3.445e6,
                frequency: 391_016_296_050_000.0,
                linewidth: 6.035e6,
                saturation_intensity: 17.5,
            },
            Isotope::Potassium41 => AtomicStructure {
                isotope: *self,
                mass: 40.961_825_76,
                nuclear_spin: 1.5,
                j_ground: 0.5,
                j_excited: 1.5,
                gj_ground: 2.002_294_21,
                gj_excited: 1.3341,
                a_ground: 127.006_935_2e6,
                a_excited: 3.363e6,
                b_excited: 3.351e6,
                frequency: 391_016_406_210_000.0,
                linewidth: 6.035e6,
                saturation_intensity: 17.5,
            },
        }
    }
}

impl fmt::Display for Isotope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.mass_number())
    }
}

impl FromStr for Isotope {
    type Err = Error;

    /// Accepts `K39`, `39K` and `potassium39` style labels, ignoring case.
    fn from_str(label: &str) -> Result<Self> {
        let normalised = label.trim().to_ascii_lowercase();
        let number = normalised
            .strip_prefix("potassium")
            .or_else(|| normalised.strip_prefix('k'))
            .or_else(|| normalised.strip_suffix('k'))
            .map(|s| s.trim_matches(|c| c == '-' || c == '_' || c == ' '));
        Isotope::ALL
            .iter()
            .copied()
            .find(|isotope| number == Some(isotope.mass_number().to_string().as_str()))
            .ok_or_else(|| Error::UnknownSpecies(label.to_string()))
    }
}

/// Level structure of an alkali atom relevant to the D2 cooling line.
///
/// Angular momenta are stored as `f64` so half-integer values can be represented.
/// Hyperfine constants are in Hz.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AtomicStructure {
    pub isotope: Isotope,
    /// Atomic mass, amu.
    pub mass: f64,
    pub nuclear_spin: f64,
    pub j_ground: f64,
    pub j_excited: f64,
    pub gj_ground: f64,
    pub gj_excited: f64,
    pub a_ground: f64,
    pub a_excited: f64,
    pub b_excited: f64,
    /// D2 transition frequency, Hz.
    pub frequency: f64,
    /// Natural linewidth, Hz.
    pub linewidth: f64,
    /// Saturation intensity of the cycling transition, W/m^2.
    pub saturation_intensity: f64,
}

/// The stretched cycling pair `|F, m_F = F> -> |F', m_F' = F'>`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StretchedStates {
    pub f_ground: f64,
    pub f_excited: f64,
    pub gf_ground: f64,
    pub gf_excited: f64,
}

impl AtomicStructure {
    /// Hyperfine Lande g-factor of the level `F` of a fine-structure state `J`, neglecting
    /// the nuclear contribution.
    pub fn hyperfine_g_factor(&self, j: f64, gj: f64, f: f64) -> f64 {
        let i = self.nuclear_spin;
        gj * (f * (f + 1.0) - i * (i + 1.0) + j * (j + 1.0)) / (2.0 * f * (f + 1.0))
    }

    /// The highest-F ground and excited levels, which form a closed cycling transition.
    pub fn stretched_states(&self) -> StretchedStates {
        let f_ground = self.nuclear_spin + self.j_ground;
        let f_excited = self.nuclear_spin + self.j_excited;
        StretchedStates {
            f_ground,
            f_excited,
            gf_ground: self.hyperfine_g_factor(self.j_ground, self.gj_ground, f_ground),
            gf_excited: self.hyperfine_g_factor(self.j_excited, self.gj_excited, f_excited),
        }
    }

    /// Differential magnetic moment of the sigma_+ cycling transition, J/T.
    pub fn stretched_moment(&self) -> f64 {
        let s = self.stretched_states();
        (s.gf_excited * s.f_excited - s.gf_ground * s.f_ground) * BOHRMAG
    }

    /// Effective two-level transition for laser cooling on the cycling line.
    ///
    /// The sigma_+ and sigma_- components are shifted in opposite directions by the
    /// stretched-state moment; the pi component is unshifted.
    pub fn cooling_transition(&self) -> AtomicTransition {
        let moment = self.stretched_moment();
        AtomicTransition {
            mup: moment,
            mum: -moment,
            muz: 0.0,
            frequency: self.frequency,
            linewidth: self.linewidth,
            saturation_intensity: self.saturation_intensity,
        }
    }

    /// Hyperfine splitting between the two ground levels, Hz.
    pub fn ground_hyperfine_splitting(&self) -> f64 {
        let upper = self.nuclear_spin + self.j_ground;
        let lower = (self.nuclear_spin - self.j_ground).abs();
        hyperfine_shift(self.a_ground, 0.0, self.nuclear_spin, self.j_ground, upper)
            - hyperfine_shift(self.a_ground, 0.0, self.nuclear_spin, self.j_ground, lower)
    }
}

/// Energy shift of hyperfine level `F`, in the same units as `a` and `b`.
///
/// The electric quadrupole term only contributes when both `I` and `J` exceed 1/2.
pub fn hyperfine_shift(a: f64, b: f64, i: f64, j: f64, f: f64) -> f64 {
    let k = f * (f + 1.0) - i * (i + 1.0) - j * (j + 1.0);
    let magnetic = 0.5 * a * k;
    if i <= 0.5 || j <= 0.5 {
        return magnetic;
    }
    let quadrupole = b * (1.5 * k * (k + 1.0) - 2.0 * i * (i + 1.0) * j * (j + 1.0))
        / (4.0 * i * (2.0 * i - 1.0) * j * (2.0 * j - 1.0));
    magnetic + quadrupole
}
