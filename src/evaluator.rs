//! Evaluation of force profiles with the steady-state rate equations.
//!
//! Every grid point becomes a sampler entity in a `specs` world. The laser, magnetic and
//! laser cooling systems then run over the samplers exactly as they would for atoms in a
//! trajectory simulation, but only once, and the resulting forces are read back.

use crate::atom::{self, ClearForceSystem, Force, GridIndex, Mass, Position, Velocity};
use crate::error::{Error, Result};
use crate::gravity::{ApplyGravitationalForceSystem, ApplyGravityOption};
use crate::grid::Grid;
use crate::laser;
use crate::laser::beams::BeamSet;
use crate::laser::index::LaserIndex;
use crate::laser::intensity::LaserIntensitySamplers;
use crate::laser_cooling;
use crate::laser_cooling::doppler::DopplerShiftSamplers;
use crate::laser_cooling::rate::RateCoefficients;
use crate::laser_cooling::sampler::LaserDetuningSamplers;
use crate::laser_cooling::transition::AtomicTransition;
use crate::laser_cooling::twolevel::TwoLevelPopulation;
use crate::laser_cooling::zeeman::{ZeemanShiftOption, ZeemanShiftSampler};
use crate::magnetic::{self, FieldConfiguration, MagneticFieldSampler};
use crate::profile::ForceProfile;
use crate::species::Isotope;
use crate::sweep::ProgressReporter;
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use specs::{Builder, Dispatcher, DispatcherBuilder, Entity, Join, World, WorldExt};
use tracing::{debug, info};

/// Computes named force profiles over a grid.
///
/// A generator owns the profiles it computes; callers borrow them.
pub trait ForceProfileGenerator {
    /// Evaluates the force at every point of `grid` and stores it as profile `name`,
    /// replacing any profile previously stored under that name.
    fn generate_force_profile(
        &mut self,
        name: &str,
        grid: &Grid,
        progress: &mut dyn ProgressReporter,
    ) -> Result<&ForceProfile>;

    /// A previously generated profile.
    fn profile(&self, name: &str) -> Option<&ForceProfile>;
}

/// Physical effects that can be switched on or off in the evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectFlags {
    /// Shift the transition by the Zeeman effect of the local field.
    pub zeeman_shift: bool,
    /// Add the gravitational force along `-z`.
    pub gravity: bool,
}

impl Default for EffectFlags {
    fn default() -> Self {
        EffectFlags {
            zeeman_shift: true,
            gravity: false,
        }
    }
}

pub const DEFAULT_CHUNK_SIZE: usize = 4096;

const APPLY_GRAVITY_SYSTEM_NAME: &str = "apply_gravity";

/// Registers all components used during force evaluation.
pub fn register_components(world: &mut World) {
    atom::register_components(world);
    magnetic::register_components(world);
    laser::register_components(world);
    laser_cooling::register_components(world);
}

/// Creates a `Dispatcher` that evaluates the force on every sampler.
pub fn create_dispatcher() -> Dispatcher<'static, 'static> {
    let mut builder = DispatcherBuilder::new();
    builder.add(ClearForceSystem, atom::CLEAR_FORCE_SYSTEM_NAME, &[]);
    magnetic::add_systems_to_dispatch(&mut builder, &[]);
    laser::add_systems_to_dispatch(&mut builder, &[]);
    laser_cooling::add_systems_to_dispatch(&mut builder, &[atom::CLEAR_FORCE_SYSTEM_NAME]);
    builder.add(
        ApplyGravitationalForceSystem,
        APPLY_GRAVITY_SYSTEM_NAME,
        &[laser_cooling::SCATTERING_FORCE_SYSTEM_NAME],
    );
    builder.build()
}

/// The rate-equation force evaluator for one isotope, beam set and magnetic field.
pub struct RateEquationEvaluator {
    world: World,
    dispatcher: Dispatcher<'static, 'static>,
    isotope: Isotope,
    transition: AtomicTransition,
    chunk_size: usize,
    profiles: HashMap<String, ForceProfile>,
}

impl RateEquationEvaluator {
    pub fn new(
        isotope: Isotope,
        beams: &BeamSet,
        field: &FieldConfiguration,
        effects: EffectFlags,
    ) -> Self {
        let transition = isotope.structure().cooling_transition();
        let mut world = World::new();
        register_components(&mut world);
        world.insert(transition);
        world.insert(if effects.zeeman_shift {
            ZeemanShiftOption::On
        } else {
            ZeemanShiftOption::Off
        });
        if effects.gravity {
            world.insert(ApplyGravityOption);
        }

        for (cooling, gaussian) in beams.beams.iter() {
            world
                .create_entity()
                .with(*cooling)
                .with(*gaussian)
                .with(LaserIndex::default())
                .build();
        }
        field.create_entities(&mut world);

        let mut dispatcher = create_dispatcher();
        dispatcher.setup(&mut world);
        debug!(
            isotope = %isotope,
            beams = beams.len(),
            ?effects,
            "created rate equation evaluator"
        );

        RateEquationEvaluator {
            world,
            dispatcher,
            isotope,
            transition,
            chunk_size: DEFAULT_CHUNK_SIZE,
            profiles: HashMap::new(),
        }
    }

    /// Sets the number of grid points evaluated per dispatch; progress is reported after each.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidParameter {
                name: "chunk_size",
                reason: "must be at least 1".to_string(),
            });
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    pub fn isotope(&self) -> Isotope {
        self.isotope
    }

    pub fn transition(&self) -> &AtomicTransition {
        &self.transition
    }

    fn create_sampler(&mut self, grid: &Grid, i: usize, j: usize, mass: f64) -> Entity {
        let (pos, vel) = grid.point(i, j);
        self.world
            .create_entity()
            .with(Position { pos })
            .with(Velocity { vel })
            .with(Mass { value: mass })
            .with(GridIndex {
                position: i,
                velocity: j,
            })
            .with(Force::default())
            .with(MagneticFieldSampler::default())
            .with(LaserIntensitySamplers::default())
            .with(DopplerShiftSamplers::default())
            .with(ZeemanShiftSampler::default())
            .with(LaserDetuningSamplers::default())
            .with(RateCoefficients::default())
            .with(TwoLevelPopulation::default())
            .build()
    }

    /// Runs the systems once over the samplers for `points` and writes the results into `samples`.
    fn evaluate_chunk(
        &mut self,
        grid: &Grid,
        points: &[(usize, usize)],
        samples: &mut Samples,
    ) -> Result<()> {
        let mass = self.isotope.structure().mass;
        let entities: Vec<Entity> = points
            .iter()
            .map(|&(i, j)| self.create_sampler(grid, i, j, mass))
            .collect();
        self.world.maintain();

        self.dispatcher.dispatch(&self.world);
        self.world.maintain();

        {
            let gamma = self.transition.gamma();
            let indices = self.world.read_storage::<GridIndex>();
            let forces = self.world.read_storage::<Force>();
            let populations = self.world.read_storage::<TwoLevelPopulation>();
            for (index, force, population) in (&indices, &forces, &populations).join() {
                let n = grid.flat_index(index.position, index.velocity);
                samples.forces[n] = force.force;
                samples.excited[n] = population.excited;
                samples.scattering_rate[n] = gamma * population.excited;
            }
        }

        self.world
            .delete_entities(&entities)
            .map_err(|err| Error::Ecs(err.to_string()))?;
        self.world.maintain();
        Ok(())
    }
}

/// Per-point results in the grid's flat index order.
struct Samples {
    forces: Vec<Vector3<f64>>,
    excited: Vec<f64>,
    scattering_rate: Vec<f64>,
}

impl Samples {
    fn new(len: usize) -> Self {
        Samples {
            forces: vec![Vector3::repeat(f64::NAN); len],
            excited: vec![f64::NAN; len],
            scattering_rate: vec![f64::NAN; len],
        }
    }
}

impl ForceProfileGenerator for RateEquationEvaluator {
    fn generate_force_profile(
        &mut self,
        name: &str,
        grid: &Grid,
        progress: &mut dyn ProgressReporter,
    ) -> Result<&ForceProfile> {
        let total = grid.len();
        let points: Vec<(usize, usize)> = grid.indices().collect();
        let mut samples = Samples::new(total);

        let mut completed = 0;
        for chunk in points.chunks(self.chunk_size) {
            self.evaluate_chunk(grid, chunk, &mut samples)?;
            completed += chunk.len();
            debug!(profile = name, completed, total, "evaluated chunk");
            progress.report(name, completed, total);
        }

        for (n, &(i, j)) in points.iter().enumerate() {
            let finite = samples.forces[n].iter().all(|f| f.is_finite());
            if !finite {
                return Err(Error::NonFinite {
                    profile: name.to_string(),
                    position: grid.positions()[i],
                    velocity: grid.velocities()[j],
                });
            }
        }

        info!(profile = name, points = total, "generated force profile");
        let profile = ForceProfile {
            name: name.to_string(),
            grid: grid.clone(),
            forces: samples.forces,
            excited: samples.excited,
            scattering_rate: samples.scattering_rate,
        };
        match self.profiles.entry(name.to_string()) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(profile);
                Ok(&*occupied.into_mut())
            }
            Entry::Vacant(vacant) => Ok(&*vacant.insert(profile)),
        }
    }

    fn profile(&self, name: &str) -> Option<&ForceProfile> {
        self.profiles.get(name)
    }
}
