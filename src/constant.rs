/// Reduced plank constant in SI units
pub const HBAR: f64 = 1.054_571_817e-34;

/// Gravitational acceleration in SI units
pub const GC: f64 = 9.80665;

/// Mathematica constant pi
pub const PI: f64 = std::f64::consts::PI;

// The Bohr magneton, defined in SI units of Joules/Tesla.
pub const BOHRMAG: f64 = 9.274_010_078_3e-24;

/// The value of 1 Atomic Mass Unit (amu) in SI units of kg.
pub const AMU: f64 = 1.660_539_066_60e-27;

/// Speed of light in SI units of m/s
pub const C: f64 = 299_792_458.0;
