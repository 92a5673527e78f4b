//! Sweep configuration, loaded from a YAML file.
//!
//! A configuration file fixes everything a run needs: the isotope, beam geometry and
//! parameters, magnetic field, grid, and the set of labelled polarization configurations.
//!
//! ```yaml
//! species: K39
//! geometry:
//!   kind: molasses_1d
//!   axis: [0.0, 0.0, 1.0]
//! detuning: -1.0
//! saturation: 1.0
//! units: natural
//! grid:
//!   velocities: { start: -2.0, stop: 2.0, num: 81 }
//! configurations:
//!   - label: sigma+sigma+
//!     polarizations: [1, 1]
//! ```

use crate::error::{Error, Result};
use crate::evaluator::{EffectFlags, RateEquationEvaluator, DEFAULT_CHUNK_SIZE};
use crate::grid::{Grid, GridConfiguration};
use crate::laser::beams::{BeamGeometry, BeamParameters, BeamSet};
use crate::laser_cooling::transition::AtomicTransition;
use crate::magnetic::FieldConfiguration;
use crate::profile::ProfileSet;
use crate::species::Isotope;
use crate::sweep::{run_sweep, Configuration, ConfigurationSet, ProgressReporter};
use crate::units::{NaturalUnits, UnitSystem};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

fn default_e_radius() -> f64 {
    f64::INFINITY
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_true() -> bool {
    true
}

/// Controls the files written after a sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputConfiguration {
    /// Unit system of the exported tables and figures.
    #[serde(default)]
    pub units: UnitSystem,
    #[serde(default = "default_true")]
    pub csv: bool,
    #[serde(default = "default_true")]
    pub plot: bool,
    /// Title of the figure, defaults to the species label.
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for OutputConfiguration {
    fn default() -> Self {
        OutputConfiguration {
            units: UnitSystem::default(),
            csv: true,
            plot: true,
            title: None,
        }
    }
}

/// Everything needed to run a force profile sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepConfiguration {
    /// Isotope label, e.g. `K39`.
    pub species: String,
    pub geometry: BeamGeometry,
    /// Detuning of all beams in units of the natural linewidth.
    pub detuning: f64,
    /// Saturation parameter of each beam.
    pub saturation: f64,
    /// 1/e intensity radius of the beams in m; plane waves by default.
    #[serde(default = "default_e_radius")]
    pub e_radius: f64,
    #[serde(default)]
    pub field: FieldConfiguration,
    #[serde(default)]
    pub effects: EffectFlags,
    /// Unit system of the grid values.
    #[serde(default)]
    pub units: UnitSystem,
    pub grid: GridConfiguration,
    pub configurations: Vec<Configuration>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default)]
    pub output: OutputConfiguration,
}

impl SweepConfiguration {
    /// Loads a configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = SweepConfiguration::from_yaml(&contents)?;
        info!(
            path = %path.as_ref().display(),
            species = %config.species,
            "loaded sweep configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn isotope(&self) -> Result<Isotope> {
        self.species.parse()
    }

    pub fn transition(&self) -> Result<AtomicTransition> {
        Ok(self.isotope()?.structure().cooling_transition())
    }

    pub fn natural_units(&self) -> Result<NaturalUnits> {
        Ok(NaturalUnits::for_transition(&self.transition()?))
    }

    /// The SI grid described by the configuration.
    pub fn grid(&self) -> Result<Grid> {
        let (length, velocity, _) = self.natural_units()?.scales(self.units);
        self.grid.build(length, velocity)
    }

    pub fn configuration_set(&self) -> Result<ConfigurationSet> {
        ConfigurationSet::new(self.configurations.clone())
    }

    /// The beams for one configuration, with its polarizations and overrides applied.
    pub fn beam_set(&self, configuration: &Configuration) -> Result<BeamSet> {
        let beams = self.geometry.beam_count();
        if configuration.polarizations.len() != beams {
            return Err(Error::PolarizationCount {
                label: configuration.label.clone(),
                given: configuration.polarizations.len(),
                beams,
            });
        }
        let parameters = BeamParameters {
            detuning: configuration.detuning.unwrap_or(self.detuning),
            saturation: configuration.saturation.unwrap_or(self.saturation),
            e_radius: self.e_radius,
        };
        BeamSet::build(
            &self.geometry,
            &self.transition()?,
            &parameters,
            &configuration.polarizations,
        )
    }

    /// Constructs the force evaluator for one configuration.
    pub fn build_evaluator(&self, configuration: &Configuration) -> Result<RateEquationEvaluator> {
        let beams = self.beam_set(configuration)?;
        RateEquationEvaluator::new(self.isotope()?, &beams, &self.field, self.effects)
            .with_chunk_size(self.chunk_size)
    }

    /// Runs the sweep over all configurations.
    pub fn run(&self, progress: &mut dyn ProgressReporter) -> Result<ProfileSet> {
        let grid = self.grid()?;
        let configurations = self.configuration_set()?;
        run_sweep(
            &grid,
            &configurations,
            |configuration| self.build_evaluator(configuration),
            progress,
        )
    }
}
