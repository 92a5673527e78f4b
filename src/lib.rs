//! Laser cooling force profiles for potassium.
//!
//! A sweep evaluates one named force profile per polarization configuration over a grid of
//! positions and velocities. Forces are computed from the steady-state two-level rate
//! equations, with every grid point represented as an entity of a `specs` world.

#[macro_use]
extern crate specs_derive;

pub mod atom;
pub mod configuration;
pub mod constant;
pub mod error;
pub mod evaluator;
pub mod gravity;
pub mod grid;
pub mod integration_tests;
pub mod laser;
pub mod laser_cooling;
pub mod magnetic;
pub mod maths;
pub mod output;
pub mod profile;
pub mod species;
pub mod sweep;
pub mod units;

pub use configuration::SweepConfiguration;
pub use error::{Error, Result};
pub use evaluator::{EffectFlags, ForceProfileGenerator, RateEquationEvaluator};
pub use grid::Grid;
pub use profile::{ForceProfile, ProfileSet};
pub use species::Isotope;
pub use sweep::{
    run_sweep, Configuration, ConfigurationSet, LogProgress, NoProgress, ProgressReporter,
};
