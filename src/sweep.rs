//! Parameter sweep: one force profile per named configuration.

use crate::error::{Error, Result};
use crate::evaluator::ForceProfileGenerator;
use crate::grid::Grid;
use crate::profile::ProfileSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Receives progress updates from a long-running force profile evaluation.
///
/// Reporting is purely observational and never changes results.
pub trait ProgressReporter {
    /// `completed` of `total` grid points of profile `name` have been evaluated.
    fn report(&mut self, name: &str, completed: usize, total: usize);
}

/// Discards all progress updates.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _name: &str, _completed: usize, _total: usize) {}
}

/// Logs progress, at most once per `step` percent.
#[derive(Clone, Copy, Debug)]
pub struct LogProgress {
    step: usize,
    last: Option<usize>,
}

impl LogProgress {
    pub fn new(step: usize) -> Self {
        LogProgress {
            step: step.max(1),
            last: None,
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        LogProgress::new(10)
    }
}

impl ProgressReporter for LogProgress {
    fn report(&mut self, name: &str, completed: usize, total: usize) {
        let percent = if total == 0 {
            100
        } else {
            100 * completed / total
        };
        let bucket = percent / self.step;
        if completed == total || self.last.map_or(true, |last| bucket > last) {
            info!(profile = name, completed, total, "{}% evaluated", percent);
            self.last = if completed == total { None } else { Some(bucket) };
        }
    }
}

/// The polarization tuple of one named configuration, with optional beam overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub label: String,
    /// One polarization per beam, `+1` or `-1`, in beam order.
    pub polarizations: Vec<i32>,
    /// Detuning override in units of the natural linewidth.
    #[serde(default)]
    pub detuning: Option<f64>,
    /// Saturation parameter override, per beam.
    #[serde(default)]
    pub saturation: Option<f64>,
}

impl Configuration {
    pub fn new(label: &str, polarizations: Vec<i32>) -> Self {
        Configuration {
            label: label.to_string(),
            polarizations,
            detuning: None,
            saturation: None,
        }
    }
}

/// An ordered set of configurations with unique labels.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigurationSet {
    configurations: Vec<Configuration>,
}

impl ConfigurationSet {
    pub fn new(configurations: Vec<Configuration>) -> Result<Self> {
        for (n, configuration) in configurations.iter().enumerate() {
            if configurations[..n]
                .iter()
                .any(|other| other.label == configuration.label)
            {
                return Err(Error::DuplicateLabel(configuration.label.clone()));
            }
        }
        Ok(ConfigurationSet { configurations })
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Configuration> {
        self.configurations.iter()
    }
}

/// Evaluates a force profile over `grid` for every configuration, in order.
///
/// `build` constructs the generator for a configuration. Each generator is asked for exactly one
/// profile, named after the configuration label. The first error from `build` or from an
/// evaluation aborts the sweep and is returned; no partial results are kept.
pub fn run_sweep<G, F>(
    grid: &Grid,
    configurations: &ConfigurationSet,
    mut build: F,
    progress: &mut dyn ProgressReporter,
) -> Result<ProfileSet>
where
    G: ForceProfileGenerator,
    F: FnMut(&Configuration) -> Result<G>,
{
    let (p, v) = grid.shape();
    info!(
        configurations = configurations.len(),
        positions = p,
        velocities = v,
        "starting sweep"
    );
    let mut results = ProfileSet::new();
    for configuration in configurations.iter() {
        debug!(label = %configuration.label, "building force evaluator");
        let mut generator = build(configuration)?;
        let profile = generator.generate_force_profile(&configuration.label, grid, progress)?;
        results.insert(&configuration.label, profile.clone())?;
        info!(label = %configuration.label, "force profile complete");
    }
    Ok(results)
}
