//! Components describing the sample points at which forces are evaluated.
//!
//! Each point of a force profile grid is represented by an entity, in the same way an
//! atom would be in a trajectory simulation.

use nalgebra::Vector3;
use specs::{Component, VecStorage};

/// Position of an entity in space, with respect to cartesian x,y,z axes.
///
/// SI units (metres)
#[derive(Clone, Copy, Debug)]
pub struct Position {
    pub pos: Vector3<f64>,
}

impl Component for Position {
    type Storage = VecStorage<Self>;
}

/// Velocity of an entity in space, with respect to cartesian x,y,z axes.
///
/// SI units (metres/second)
#[derive(Clone, Copy, Debug)]
pub struct Velocity {
    pub vel: Vector3<f64>,
}

impl Component for Velocity {
    type Storage = VecStorage<Self>;
}

/// Force applied to an entity, with respect to cartesian x,y,z axes.
///
/// SI units (Newtons)
#[derive(Clone, Copy, Debug)]
pub struct Force {
    pub force: Vector3<f64>,
}

impl Component for Force {
    type Storage = VecStorage<Self>;
}

impl Default for Force {
    fn default() -> Self {
        Force {
            force: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

/// Inertial and gravitational mass of an entity
///
/// Mass is specified in atom mass units (amu).
#[derive(Clone, Copy, Debug)]
pub struct Mass {
    pub value: f64,
}

impl Component for Mass {
    type Storage = VecStorage<Self>;
}

/// Location of the entity in the `(position, velocity)` grid of a force profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Component)]
#[storage(VecStorage)]
pub struct GridIndex {
    pub position: usize,
    pub velocity: usize,
}

/// System that sets the force on each sampler to zero before the force systems run.
pub struct ClearForceSystem;

impl<'a> specs::System<'a> for ClearForceSystem {
    type SystemData = specs::WriteStorage<'a, Force>;

    fn run(&mut self, mut force: Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        (&mut force).par_join().for_each(|force| {
            force.force = Vector3::new(0.0, 0.0, 0.0);
        });
    }
}

pub const CLEAR_FORCE_SYSTEM_NAME: &str = "clear_force";

/// Registers the components that describe sample points to the ecs world.
pub fn register_components(world: &mut specs::World) {
    use specs::WorldExt;

    world.register::<Position>();
    world.register::<Velocity>();
    world.register::<Force>();
    world.register::<Mass>();
    world.register::<GridIndex>();
}
