//! Writes sweep results to disk: CSV tables, a JSON summary and gnuplot figures.

pub mod plot;
pub mod summary;
pub mod table;

use crate::configuration::OutputConfiguration;
use crate::error::Result;
use crate::profile::ProfileSet;
use crate::units::NaturalUnits;
use plot::PlotMode;
use std::path::{Path, PathBuf};
use tracing::info;

/// A file name for `label` that only uses characters safe on common file systems.
pub fn file_stem(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '+' | '.' => c,
            _ => '_',
        })
        .collect();
    if stem.is_empty() {
        "profile".to_string()
    } else {
        stem
    }
}

/// Writes every output enabled in `config` into `dir`, creating it if needed.
///
/// Returns the paths of the written files.
pub fn write_results(
    results: &ProfileSet,
    units: &NaturalUnits,
    config: &OutputConfiguration,
    title: &str,
    plot_mode: PlotMode,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    if config.csv {
        for (label, profile) in results.iter() {
            let path = dir.join(format!("{}.csv", file_stem(label)));
            table::write_profile_csv(profile, units, config.units, &path)?;
            written.push(path);
        }
    }

    let path = dir.join("summary.json");
    summary::write_summary(results, units, config.units, &path)?;
    written.push(path);

    if config.plot {
        let title = config.title.as_deref().unwrap_or(title);
        written.extend(plot::write_force_plot(
            results,
            units,
            config.units,
            title,
            plot_mode,
            &dir.join("force"),
        )?);
    }

    for path in written.iter() {
        info!(path = %path.display(), "wrote output");
    }
    Ok(written)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::profile::tests::linear_profile;
    use crate::species::Isotope;
    use crate::units::UnitSystem;

    fn write_to(name: &str, csv: bool, plot: bool) -> (PathBuf, Vec<PathBuf>) {
        let grid = Grid::velocity_sweep(vec![0.1, 0.2, 0.3]).unwrap();
        let mut results = ProfileSet::new();
        for label in ["sigma+sigma+", "lin perp/lin"].iter() {
            results.insert(label, linear_profile(label, &grid)).unwrap();
        }
        let units =
            NaturalUnits::for_transition(&Isotope::Potassium41.structure().cooling_transition());
        let config = OutputConfiguration {
            units: UnitSystem::Natural,
            csv,
            plot,
            title: None,
        };

        let dir = std::env::temp_dir().join(format!("kforce-{}-{}", name, std::process::id()));
        let written =
            write_results(&results, &units, &config, "41K", PlotMode::ScriptOnly, &dir).unwrap();
        for path in written.iter() {
            assert!(path.exists(), "{}", path.display());
        }
        (dir, written)
    }

    #[test]
    fn test_write_results_all_outputs() {
        let (dir, written) = write_to("all", true, true);
        assert_eq!(
            written,
            vec![
                dir.join("sigma+sigma+.csv"),
                dir.join("lin_perp_lin.csv"),
                dir.join("summary.json"),
                dir.join("force.gp"),
            ]
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_results_summary_is_always_written() {
        let (dir, written) = write_to("summary", false, false);
        assert_eq!(written, vec![dir.join("summary.json")]);
        assert!(!dir.join("force.gp").exists());
        assert!(!dir.join("sigma+sigma+.csv").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("sigma+sigma-"), "sigma+sigma-");
        assert_eq!(file_stem("lin perp/lin"), "lin_perp_lin");
        assert_eq!(file_stem(""), "profile");
    }
}
