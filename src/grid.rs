//! The `(position, velocity)` grid over which force profiles are evaluated.

use crate::error::{Error, Result};
use crate::maths;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A 2-D coordinate grid along a sweep axis.
///
/// Point `(i, j)` sits at `axis * positions[i]` and moves with velocity `axis * velocities[j]`.
/// All values are SI.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    axis: Vector3<f64>,
    positions: Vec<f64>,
    velocities: Vec<f64>,
}

impl Grid {
    /// Creates a grid, rejecting empty or non-finite sequences, repeated values and a zero axis.
    pub fn new(axis: Vector3<f64>, positions: Vec<f64>, velocities: Vec<f64>) -> Result<Self> {
        if !(axis.norm() > 0.0) || !axis.iter().all(|c| c.is_finite()) {
            return Err(Error::ZeroAxis);
        }
        check_values("position", &positions)?;
        check_values("velocity", &velocities)?;
        Ok(Grid {
            axis: axis.normalize(),
            positions,
            velocities,
        })
    }

    /// A sweep over `velocities` along z, with the position fixed at the origin.
    pub fn velocity_sweep(velocities: Vec<f64>) -> Result<Self> {
        Grid::new(Vector3::z(), vec![0.0], velocities)
    }

    pub fn axis(&self) -> Vector3<f64> {
        self.axis
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    /// `(P, V)`
    pub fn shape(&self) -> (usize, usize) {
        (self.positions.len(), self.velocities.len())
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.positions.len() * self.velocities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of point `(i, j)`, row-major in position.
    pub fn flat_index(&self, i: usize, j: usize) -> usize {
        i * self.velocities.len() + j
    }

    /// Position and velocity vectors of point `(i, j)`.
    pub fn point(&self, i: usize, j: usize) -> (Vector3<f64>, Vector3<f64>) {
        (
            self.axis * self.positions[i],
            self.axis * self.velocities[j],
        )
    }

    /// Iterates over `(i, j)` in flat index order.
    pub fn indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let v = self.velocities.len();
        (0..self.len()).map(move |n| (n / v, n % v))
    }
}

fn check_values(axis: &'static str, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::EmptyGrid(axis));
    }
    if let Some(&value) = values.iter().find(|v| !v.is_finite()) {
        return Err(Error::NonFiniteGridValue { axis, value });
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(Error::DuplicateGridValue {
            axis,
            value: pair[0],
        });
    }
    Ok(())
}

/// A list of grid values, either given explicitly or evenly spaced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridValues {
    List(Vec<f64>),
    Linspace { start: f64, stop: f64, num: usize },
}

impl GridValues {
    pub fn values(&self) -> Vec<f64> {
        match self {
            GridValues::List(values) => values.clone(),
            GridValues::Linspace { start, stop, num } => maths::linspace(*start, *stop, *num),
        }
    }
}

fn default_axis() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

fn default_positions() -> GridValues {
    GridValues::List(vec![0.0])
}

/// Grid as it appears in a sweep configuration file, in the configured unit system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfiguration {
    #[serde(default = "default_axis")]
    pub axis: [f64; 3],
    #[serde(default = "default_positions")]
    pub positions: GridValues,
    pub velocities: GridValues,
}

impl GridConfiguration {
    /// Builds the SI grid, scaling positions by `length_scale` and velocities by `velocity_scale`.
    pub fn build(&self, length_scale: f64, velocity_scale: f64) -> Result<Grid> {
        let scale = |values: Vec<f64>, factor: f64| -> Vec<f64> {
            values.into_iter().map(|v| v * factor).collect()
        };
        Grid::new(
            Vector3::new(self.axis[0], self.axis[1], self.axis[2]),
            scale(self.positions.values(), length_scale),
            scale(self.velocities.values(), velocity_scale),
        )
    }
}
