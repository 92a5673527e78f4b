//! Force profiles of a 1D optical molasses for each potassium isotope.
//!
//! The molasses is formed by counter-propagating beams along the z-axis. For each isotope,
//! the force is evaluated over velocity with the position fixed at the origin, and the
//! results are written to `molasses_1d/`.

extern crate kforce as lib;
use lib::configuration::OutputConfiguration;
use lib::evaluator::{EffectFlags, RateEquationEvaluator};
use lib::grid::Grid;
use lib::laser::beams::{BeamGeometry, BeamParameters, BeamSet};
use lib::magnetic::FieldConfiguration;
use lib::maths::linspace;
use lib::output::{self, plot::PlotMode};
use lib::species::Isotope;
use lib::sweep::{run_sweep, Configuration, ConfigurationSet, LogProgress};
use lib::units::{NaturalUnits, UnitSystem};
use std::path::Path;

fn main() -> lib::Result<()> {
    tracing_subscriber::fmt::init();

    let geometry = BeamGeometry::Molasses1d {
        axis: [0.0, 0.0, 1.0],
    };
    let parameters = BeamParameters {
        detuning: -1.0,
        saturation: 1.0,
        e_radius: f64::INFINITY,
    };

    let mut configurations = Vec::new();
    for isotope in Isotope::ALL.iter() {
        configurations.push(Configuration::new(&isotope.to_string(), vec![1, 1]));
    }
    let configurations = ConfigurationSet::new(configurations)?;

    // Velocities in units of Gamma/k; the scale is nearly identical for all isotopes.
    let transition = Isotope::Potassium39.structure().cooling_transition();
    let units = NaturalUnits::for_transition(&transition);
    let velocities = linspace(-3.0, 3.0, 121)
        .into_iter()
        .map(|v| v * units.velocity)
        .collect();
    let grid = Grid::velocity_sweep(velocities)?;

    let results = run_sweep(
        &grid,
        &configurations,
        |configuration| {
            let isotope: Isotope = configuration.label.parse()?;
            let transition = isotope.structure().cooling_transition();
            let beams = BeamSet::build(
                &geometry,
                &transition,
                &parameters,
                &configuration.polarizations,
            )?;
            Ok(RateEquationEvaluator::new(
                isotope,
                &beams,
                &FieldConfiguration::None,
                EffectFlags::default(),
            ))
        },
        &mut LogProgress::default(),
    )?;

    for (label, profile) in results.iter() {
        let (_, v) = profile.grid.shape();
        let slope = profile.along_axis()[(0, v / 2 + 1)] / profile.grid.velocities()[v / 2 + 1];
        println!("{}: damping coefficient {:.3e} kg/s", label, -slope);
    }

    output::write_results(
        &results,
        &units,
        &OutputConfiguration {
            units: UnitSystem::Natural,
            ..OutputConfiguration::default()
        },
        "1D molasses, s = 1, detuning = -1 Gamma",
        PlotMode::ScriptOnly,
        Path::new("molasses_1d"),
    )?;
    Ok(())
}
