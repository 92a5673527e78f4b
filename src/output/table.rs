//! CSV tables of force profiles, one row per grid point.

use crate::error::Result;
use crate::profile::ForceProfile;
use crate::units::{NaturalUnits, UnitSystem};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct Row {
    position: f64,
    velocity: f64,
    fx: f64,
    fy: f64,
    fz: f64,
    excited: f64,
    scattering_rate: f64,
}

/// Writes `profile` as CSV to `writer`, in the unit system `system`.
///
/// Positions and velocities are the signed coordinates along the sweep axis.
pub fn write_profile<W: Write>(
    profile: &ForceProfile,
    units: &NaturalUnits,
    system: UnitSystem,
    writer: W,
) -> Result<()> {
    let (length, velocity, force) = units.scales(system);
    let rate = match system {
        UnitSystem::Si => 1.0,
        UnitSystem::Natural => 1.0 / units.time,
    };

    let mut wtr = csv::Writer::from_writer(writer);
    let grid = &profile.grid;
    for (i, j) in grid.indices() {
        let n = grid.flat_index(i, j);
        let f = profile.forces[n] / force;
        wtr.serialize(Row {
            position: grid.positions()[i] / length,
            velocity: grid.velocities()[j] / velocity,
            fx: f[0],
            fy: f[1],
            fz: f[2],
            excited: profile.excited[n],
            scattering_rate: profile.scattering_rate[n] / rate,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `profile` as a CSV file at `path`.
pub fn write_profile_csv(
    profile: &ForceProfile,
    units: &NaturalUnits,
    system: UnitSystem,
    path: &Path,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_profile(profile, units, system, std::io::BufWriter::new(file))
}
