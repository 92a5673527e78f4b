//! Integration tests for the parameter sweep.

#[cfg(test)]
pub mod tests {
    use crate::configuration::SweepConfiguration;
    use crate::error::{Error, Result};
    use crate::evaluator::ForceProfileGenerator;
    use crate::grid::Grid;
    use crate::profile::{ForceProfile, ProfileSet};
    use crate::sweep::{run_sweep, Configuration, ConfigurationSet, NoProgress, ProgressReporter};
    use hashbrown::HashMap;
    use nalgebra::Vector3;

    const CONFIG: &str = "
species: K40
geometry:
  kind: molasses_1d
  axis: [0.0, 0.0, 1.0]
detuning: -1.5
saturation: 0.8
field:
  kind: quadrupole
  gradient_gauss_per_cm: 10.0
  direction: [0.0, 0.0, 1.0]
grid:
  positions: [-1.0e-3, 0.0, 1.0e-3]
  velocities: [-1.0, 0.0, 0.5, 1.0]
configurations:
  - label: sigma+sigma+
    polarizations: [1, 1]
  - label: sigma+sigma-
    polarizations: [1, -1]
  - label: sigma-sigma-
    polarizations: [-1, -1]
";

    fn sweep(config: &SweepConfiguration) -> ProfileSet {
        config.run(&mut NoProgress).unwrap()
    }

    #[test]
    fn every_profile_matches_grid_shape() {
        let config = SweepConfiguration::from_yaml(CONFIG).unwrap();
        let results = sweep(&config);
        assert_eq!(results.len(), 3);
        for (label, profile) in results.iter() {
            assert_eq!(profile.shape(), (3, 3, 4), "{}", label);
            assert_eq!(profile.name, label);
        }
        assert_eq!(
            results.labels(),
            &["sigma+sigma+", "sigma+sigma-", "sigma-sigma-"]
        );
    }

    #[test]
    fn repeated_sweeps_are_bit_identical() {
        let config = SweepConfiguration::from_yaml(CONFIG).unwrap();
        let first = sweep(&config);
        let second = sweep(&config);
        for (label, profile) in first.iter() {
            let other = second.get(label).unwrap();
            assert_eq!(profile.forces, other.forces);
            assert_eq!(profile.excited, other.excited);
        }
    }

    #[test]
    fn single_point_grid() {
        let mut config = SweepConfiguration::from_yaml(CONFIG).unwrap();
        config.grid = serde_yaml::from_str("velocities: [0.3]").unwrap();
        let results = sweep(&config);
        for (_, profile) in results.iter() {
            assert_eq!(profile.shape(), (3, 1, 1));
        }
    }

    #[test]
    fn velocity_sweep_with_default_label() {
        let mut config = SweepConfiguration::from_yaml(CONFIG).unwrap();
        config.configurations = vec![Configuration::new("default", vec![1, 1])];
        let grid = Grid::velocity_sweep(vec![0.01, 0.5, 2.5]).unwrap();
        let configurations = config.configuration_set().unwrap();
        let results = run_sweep(
            &grid,
            &configurations,
            |c| config.build_evaluator(c),
            &mut NoProgress,
        )
        .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results.get("default").unwrap().shape(), (3, 1, 3));
    }

    #[test]
    fn build_errors_abort_the_sweep() {
        let mut config = SweepConfiguration::from_yaml(CONFIG).unwrap();
        config.configurations[1].polarizations = vec![1, -1, 1];
        let result = config.run(&mut NoProgress);
        assert!(matches!(
            result,
            Err(Error::PolarizationCount { ref label, .. }) if label == "sigma+sigma-"
        ));
    }

    /// Returns a constant force, or fails for one label.
    struct StubGenerator {
        fail_on: &'static str,
        profiles: HashMap<String, ForceProfile>,
    }

    impl ForceProfileGenerator for StubGenerator {
        fn generate_force_profile(
            &mut self,
            name: &str,
            grid: &Grid,
            progress: &mut dyn ProgressReporter,
        ) -> Result<&ForceProfile> {
            if name == self.fail_on {
                return Err(Error::NonFinite {
                    profile: name.to_string(),
                    position: grid.positions()[0],
                    velocity: grid.velocities()[0],
                });
            }
            progress.report(name, grid.len(), grid.len());
            let profile = ForceProfile {
                name: name.to_string(),
                grid: grid.clone(),
                forces: vec![Vector3::new(0.0, 0.0, 1.0); grid.len()],
                excited: vec![0.0; grid.len()],
                scattering_rate: vec![0.0; grid.len()],
            };
            self.profiles.insert(name.to_string(), profile);
            Ok(&self.profiles[name])
        }

        fn profile(&self, name: &str) -> Option<&ForceProfile> {
            self.profiles.get(name)
        }
    }

    struct CountingProgress(usize);

    impl ProgressReporter for CountingProgress {
        fn report(&mut self, _name: &str, _completed: usize, _total: usize) {
            self.0 += 1;
        }
    }

    #[test]
    fn generator_errors_abort_the_sweep() {
        let configurations = ConfigurationSet::new(vec![
            Configuration::new("a", vec![1, 1]),
            Configuration::new("b", vec![1, 1]),
            Configuration::new("c", vec![1, 1]),
        ])
        .unwrap();
        let grid = Grid::velocity_sweep(vec![0.1, 0.2]).unwrap();

        let mut built = Vec::new();
        let mut progress = CountingProgress(0);
        let result = run_sweep(
            &grid,
            &configurations,
            |c| {
                built.push(c.label.clone());
                Ok(StubGenerator {
                    fail_on: "b",
                    profiles: HashMap::new(),
                })
            },
            &mut progress,
        );
        assert!(matches!(result, Err(Error::NonFinite { ref profile, .. }) if profile == "b"));
        assert_eq!(built, vec!["a", "b"]);
        assert_eq!(progress.0, 1);
    }

    #[test]
    fn empty_configuration_set_gives_empty_results() {
        let configurations = ConfigurationSet::new(vec![]).unwrap();
        let grid = Grid::velocity_sweep(vec![0.1, 0.2]).unwrap();
        let mut built = 0;
        let mut progress = CountingProgress(0);
        let results = run_sweep(
            &grid,
            &configurations,
            |_| {
                built += 1;
                Ok(StubGenerator {
                    fail_on: "",
                    profiles: HashMap::new(),
                })
            },
            &mut progress,
        )
        .unwrap();
        assert_eq!(results.len(), 0);
        assert!(results.is_empty());
        assert_eq!(built, 0);
        assert_eq!(progress.0, 0);

        let mut config = SweepConfiguration::from_yaml(CONFIG).unwrap();
        config.configurations.clear();
        assert!(sweep(&config).is_empty());
    }

    #[test]
    fn each_label_evaluated_once() {
        let configurations = ConfigurationSet::new(vec![
            Configuration::new("x", vec![]),
            Configuration::new("y", vec![]),
        ])
        .unwrap();
        let grid = Grid::new(Vector3::x(), vec![0.0, 1.0], vec![0.1, 0.2, 0.3]).unwrap();
        let mut progress = CountingProgress(0);
        let results = run_sweep(
            &grid,
            &configurations,
            |_| {
                Ok(StubGenerator {
                    fail_on: "",
                    profiles: HashMap::new(),
                })
            },
            &mut progress,
        )
        .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(progress.0, 2);
        assert_eq!(results.get("y").unwrap().shape(), (3, 2, 3));
    }
}
