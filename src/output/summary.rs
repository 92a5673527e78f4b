//! A JSON summary of a sweep: shape and force extrema of each profile.

use crate::error::Result;
use crate::profile::{ForceProfile, ProfileSet};
use crate::units::{NaturalUnits, UnitSystem};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Extreme value of the force along the sweep axis and where it occurs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Extremum {
    pub force: f64,
    pub position: f64,
    pub velocity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub label: String,
    pub shape: [usize; 3],
    pub units: UnitSystem,
    pub max_force: Extremum,
    pub min_force: Extremum,
    pub max_excited: f64,
}

impl ProfileSummary {
    pub fn new(
        label: &str,
        profile: &ForceProfile,
        units: &NaturalUnits,
        system: UnitSystem,
    ) -> Self {
        let (length, velocity, force) = units.scales(system);
        let along = profile.along_axis();
        let grid = &profile.grid;
        let extremum = |pick_max: bool| {
            let mut best = (0, 0);
            for (i, j) in grid.indices() {
                let better = if pick_max {
                    along[(i, j)] > along[best]
                } else {
                    along[(i, j)] < along[best]
                };
                if better {
                    best = (i, j);
                }
            }
            Extremum {
                force: along[best] / force,
                position: grid.positions()[best.0] / length,
                velocity: grid.velocities()[best.1] / velocity,
            }
        };
        let (c, p, v) = profile.shape();
        ProfileSummary {
            label: label.to_string(),
            shape: [c, p, v],
            units: system,
            max_force: extremum(true),
            min_force: extremum(false),
            max_excited: profile.excited.iter().cloned().fold(0.0, f64::max),
        }
    }
}

pub fn summarise(
    results: &ProfileSet,
    units: &NaturalUnits,
    system: UnitSystem,
) -> Vec<ProfileSummary> {
    results
        .iter()
        .map(|(label, profile)| ProfileSummary::new(label, profile, units, system))
        .collect()
}

pub fn write_summary_to<W: Write>(
    results: &ProfileSet,
    units: &NaturalUnits,
    system: UnitSystem,
    writer: W,
) -> Result<()> {
    serde_json::to_writer_pretty(writer, &summarise(results, units, system))?;
    Ok(())
}

pub fn write_summary(
    results: &ProfileSet,
    units: &NaturalUnits,
    system: UnitSystem,
    path: &Path,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_summary_to(results, units, system, std::io::BufWriter::new(file))
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::profile::tests::linear_profile;
    use crate::species::Isotope;
    use nalgebra::Vector3;

    #[test]
    fn test_summary_extrema_along_axis() {
        let grid = Grid::new(Vector3::z(), vec![0.0, 1.0], vec![0.0, 1.0, 2.0]).unwrap();
        let mut results = ProfileSet::new();
        results
            .insert("default", linear_profile("default", &grid))
            .unwrap();
        let units =
            NaturalUnits::for_transition(&Isotope::Potassium39.structure().cooling_transition());

        let summaries = summarise(&results, &units, UnitSystem::Si);
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.shape, [3, 2, 3]);
        // fz = -j, so the largest value sits at j = 0 and the smallest at j = 2
        assert_eq!(summary.max_force.force, 0.0);
        assert_eq!(summary.min_force.force, -2.0);
        assert_eq!(summary.min_force.velocity, 2.0);

        let mut buffer = Vec::new();
        write_summary_to(&results, &units, UnitSystem::Si, &mut buffer).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(json[0]["label"], "default");
        assert_eq!(json[0]["units"], "si");
        assert_eq!(json[0]["shape"][2], 3);
    }
}
