//! Implements the force of gravity.

use crate::atom::{Force, Mass};
use crate::constant;
use nalgebra::Vector3;
use specs::{ParJoin, Read, ReadStorage, System, WriteStorage};

/// A resource that indicates that the force of gravity should be added to the sampled forces.
pub struct ApplyGravityOption;

/// This system adds the gravitational force to all entities with [Mass](struct.Mass.html).
pub struct ApplyGravitationalForceSystem;

impl<'a> System<'a> for ApplyGravitationalForceSystem {
    type SystemData = (
        WriteStorage<'a, Force>,
        ReadStorage<'a, Mass>,
        Option<Read<'a, ApplyGravityOption>>,
    );

    fn run(&mut self, (mut force, mass, gravity_option): Self::SystemData) {
        use rayon::prelude::*;

        if gravity_option.is_none() {
            return;
        }
        (&mut force, &mass).par_join().for_each(|(force, mass)| {
            force.force += mass.value * constant::AMU * constant::GC * Vector3::new(0., 0., -1.);
        });
    }
}
