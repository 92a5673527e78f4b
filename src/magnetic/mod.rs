//! Magnetic fields sampled at the force profile grid points.

use crate::atom::Position;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use specs::{
    Builder, Component, DispatcherBuilder, System, VecStorage, World, WorldExt, WriteStorage,
};

pub mod quadrupole;
pub mod uniform;

/// A component that stores the magnetic field at an entity's location.
#[derive(Copy, Clone, Debug)]
pub struct MagneticFieldSampler {
    /// Vector representing the magnetic field components along x,y,z in units of Tesla.
    pub field: Vector3<f64>,

    /// Magnitude of the magnetic field in units of Tesla
    pub magnitude: f64,
}

impl MagneticFieldSampler {
    pub fn tesla(b_field: Vector3<f64>) -> Self {
        MagneticFieldSampler {
            field: b_field,
            magnitude: b_field.norm(),
        }
    }
}

impl Component for MagneticFieldSampler {
    type Storage = VecStorage<Self>;
}

impl Default for MagneticFieldSampler {
    fn default() -> Self {
        MagneticFieldSampler {
            field: Vector3::new(0.0, 0.0, 0.0),
            magnitude: 0.0,
        }
    }
}

/// System that clears the magnetic field samplers before the field sources are summed.
pub struct ClearMagneticFieldSamplerSystem;

impl<'a> System<'a> for ClearMagneticFieldSamplerSystem {
    type SystemData = WriteStorage<'a, MagneticFieldSampler>;
    fn run(&mut self, mut sampler: Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        (&mut sampler).par_join().for_each(|sampler| {
            sampler.magnitude = 0.;
            sampler.field = Vector3::new(0.0, 0.0, 0.0)
        });
    }
}

/// System that calculates the magnitude of the magnetic field.
///
/// The magnetic field magnitude is frequently used, so it makes sense to calculate it once and cache the result.
/// This system runs after all other magnetic field systems.
pub struct CalculateMagneticFieldMagnitudeSystem;

impl<'a> System<'a> for CalculateMagneticFieldMagnitudeSystem {
    type SystemData = WriteStorage<'a, MagneticFieldSampler>;
    fn run(&mut self, mut sampler: Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        (&mut sampler).par_join().for_each(|sampler| {
            sampler.magnitude = sampler.field.norm();
            if sampler.magnitude.is_nan() {
                sampler.magnitude = 0.0;
            }
        });
    }
}

/// The magnetic field applied while a force profile is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConfiguration {
    None,
    /// A constant bias field, components in Gauss.
    Uniform { gauss: [f64; 3] },
    /// A 3D quadrupole with node at `centre` (m) and symmetry axis `direction`.
    Quadrupole {
        gradient_gauss_per_cm: f64,
        direction: [f64; 3],
        #[serde(default)]
        centre: [f64; 3],
    },
}

impl Default for FieldConfiguration {
    fn default() -> Self {
        FieldConfiguration::None
    }
}

impl FieldConfiguration {
    /// Creates the entities that act as field sources in `world`.
    pub fn create_entities(&self, world: &mut World) {
        match *self {
            FieldConfiguration::None => {}
            FieldConfiguration::Uniform { gauss } => {
                world
                    .create_entity()
                    .with(uniform::UniformMagneticField::gauss(Vector3::new(
                        gauss[0], gauss[1], gauss[2],
                    )))
                    .build();
            }
            FieldConfiguration::Quadrupole {
                gradient_gauss_per_cm,
                direction,
                centre,
            } => {
                world
                    .create_entity()
                    .with(quadrupole::QuadrupoleField3D::gauss_per_cm(
                        gradient_gauss_per_cm,
                        Vector3::new(direction[0], direction[1], direction[2]),
                    ))
                    .with(Position {
                        pos: Vector3::new(centre[0], centre[1], centre[2]),
                    })
                    .build();
            }
        }
    }
}

pub const MAGNETIC_MAGNITUDE_SYSTEM_NAME: &str = "magnetics_magnitude";

/// Adds the systems required by magnetics to the dispatcher.
///
/// #Arguments
///
/// `builder`: the dispatch builder to modify
///
/// `deps`: any dependencies that must be completed before the magnetics systems run.
pub fn add_systems_to_dispatch(builder: &mut DispatcherBuilder<'static, 'static>, deps: &[&str]) {
    builder.add(ClearMagneticFieldSamplerSystem, "magnetics_clear", deps);
    builder.add(
        quadrupole::Sample3DQuadrupoleFieldSystem,
        "magnetics_quadrupole",
        &["magnetics_clear"],
    );
    builder.add(
        uniform::UniformMagneticFieldSystem,
        "magnetics_uniform",
        &["magnetics_quadrupole"],
    );
    builder.add(
        CalculateMagneticFieldMagnitudeSystem,
        MAGNETIC_MAGNITUDE_SYSTEM_NAME,
        &["magnetics_uniform"],
    );
}

/// Registers resources required by magnetics to the ecs world.
pub fn register_components(world: &mut World) {
    world.register::<uniform::UniformMagneticField>();
    world.register::<quadrupole::QuadrupoleField3D>();
    world.register::<MagneticFieldSampler>();
}
