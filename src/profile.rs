//! Force profiles and the labelled sets produced by a sweep.

use crate::error::{Error, Result};
use crate::grid::Grid;
use hashbrown::HashMap;
use nalgebra::{DMatrix, Vector3};

/// A force vector field evaluated over every point of a [Grid].
///
/// The per-point vectors are stored in the grid's flat index order.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceProfile {
    pub name: String,
    pub grid: Grid,
    /// Force at each point, N.
    pub forces: Vec<Vector3<f64>>,
    /// Steady-state excited population at each point.
    pub excited: Vec<f64>,
    /// Total photon scattering rate at each point, photons/s.
    pub scattering_rate: Vec<f64>,
}

impl ForceProfile {
    /// `(3, P, V)`
    pub fn shape(&self) -> (usize, usize, usize) {
        let (p, v) = self.grid.shape();
        (3, p, v)
    }

    pub fn force(&self, i: usize, j: usize) -> Vector3<f64> {
        self.forces[self.grid.flat_index(i, j)]
    }

    /// One cartesian component of the force as a `P x V` matrix.
    pub fn component(&self, axis: usize) -> DMatrix<f64> {
        let (p, v) = self.grid.shape();
        DMatrix::from_fn(p, v, |i, j| self.force(i, j)[axis])
    }

    /// Force projected onto the sweep axis as a `P x V` matrix.
    pub fn along_axis(&self) -> DMatrix<f64> {
        let (p, v) = self.grid.shape();
        let axis = self.grid.axis();
        DMatrix::from_fn(p, v, |i, j| self.force(i, j).dot(&axis))
    }

    /// The force as nested arrays indexed `[component][position][velocity]`.
    pub fn to_array(&self) -> Vec<Vec<Vec<f64>>> {
        (0..3)
            .map(|c| {
                let matrix = self.component(c);
                (0..matrix.nrows())
                    .map(|i| matrix.row(i).iter().cloned().collect())
                    .collect()
            })
            .collect()
    }
}

/// Force profiles keyed by configuration label, kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct ProfileSet {
    labels: Vec<String>,
    profiles: HashMap<String, ForceProfile>,
}

impl ProfileSet {
    pub fn new() -> Self {
        ProfileSet::default()
    }

    /// Stores `profile` under `label`. Each label is written once.
    pub fn insert(&mut self, label: &str, profile: ForceProfile) -> Result<()> {
        if self.profiles.contains_key(label) {
            return Err(Error::DuplicateLabel(label.to_string()));
        }
        self.labels.push(label.to_string());
        self.profiles.insert(label.to_string(), profile);
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<&ForceProfile> {
        self.profiles.get(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Iterates over `(label, profile)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ForceProfile)> + '_ {
        self.labels
            .iter()
            .filter_map(move |label| self.profiles.get(label).map(|p| (label.as_str(), p)))
    }
}
