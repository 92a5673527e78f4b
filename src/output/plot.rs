//! Force-vs-velocity figures drawn with gnuplot.

use crate::error::Result;
use crate::profile::ProfileSet;
use crate::units::{NaturalUnits, UnitSystem};
use gnuplot::{AxesCommon, Caption, Figure, LineWidth};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::warn;

/// How figures are produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotMode {
    /// Write the gnuplot script and render it to PNG.
    Render,
    /// Only write the gnuplot script.
    ScriptOnly,
}

fn axis_labels(system: UnitSystem) -> (&'static str, &'static str) {
    match system {
        UnitSystem::Si => ("velocity (m/s)", "force (N)"),
        UnitSystem::Natural => ("velocity ({/Symbol G}/k)", "force (hbar k {/Symbol G})"),
    }
}

/// Builds a figure of the force along the sweep axis against velocity.
///
/// There is one curve per label and grid position.
pub fn force_figure(
    results: &ProfileSet,
    units: &NaturalUnits,
    system: UnitSystem,
    title: &str,
) -> Figure {
    let (length, velocity, force) = units.scales(system);
    let (x_label, y_label) = axis_labels(system);

    let mut fg = Figure::new();
    {
        let axes = fg
            .axes2d()
            .set_title(title, &[])
            .set_x_label(x_label, &[])
            .set_y_label(y_label, &[]);
        for (label, profile) in results.iter() {
            let grid = &profile.grid;
            let along = profile.along_axis();
            let velocities: Vec<f64> = grid.velocities().iter().map(|v| v / velocity).collect();
            let (positions, _) = grid.shape();
            for i in 0..positions {
                let forces: Vec<f64> = along.row(i).iter().map(|f| f / force).collect();
                let caption = if positions == 1 {
                    label.to_string()
                } else {
                    format!("{} (x = {:.3})", label, grid.positions()[i] / length)
                };
                axes.lines(&velocities, &forces, &[Caption(&caption), LineWidth(1.5)]);
            }
        }
    }
    fg
}

fn gnuplot_available() -> bool {
    Command::new("gnuplot")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Writes `<stem>.gp` and, when rendering, `<stem>.png`. Returns the files written.
///
/// If gnuplot cannot be started the figure is not rendered and only the script is kept.
pub fn write_force_plot(
    results: &ProfileSet,
    units: &NaturalUnits,
    system: UnitSystem,
    title: &str,
    mode: PlotMode,
    stem: &Path,
) -> Result<Vec<PathBuf>> {
    let script = stem.with_extension("gp");
    let png = stem.with_extension("png");

    let mut fg = force_figure(results, units, system, title);
    fg.set_terminal("pngcairo size 1024,768", &png.to_string_lossy());
    fg.echo_to_file(&script.to_string_lossy());
    let mut written = vec![script];

    if mode == PlotMode::Render {
        if gnuplot_available() {
            fg.show();
            fg.close();
            if let Some(png) = rendered(png) {
                written.push(png);
            }
        } else {
            warn!("gnuplot not found, figure left as script");
        }
    }
    Ok(written)
}

/// `png` if gnuplot produced it.
fn rendered(png: PathBuf) -> Option<PathBuf> {
    if png.exists() {
        Some(png)
    } else {
        warn!(path = %png.display(), "gnuplot did not render the figure, figure left as script");
        None
    }
}
