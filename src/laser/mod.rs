//! Laser beams: geometry, indexing and intensity sampling.

pub mod beams;
pub mod gaussian;
pub mod index;
pub mod intensity;

use specs::{DispatcherBuilder, World, WorldExt};

/// Name of the system that finishes intensity sampling; laser cooling systems depend on it.
pub const SAMPLE_INTENSITY_SYSTEM_NAME: &str = "sample_laser_intensity";
/// Name of the system that assigns laser indices.
pub const INDEX_LASERS_SYSTEM_NAME: &str = "index_lasers";

/// Adds the systems required by the module to the dispatcher.
///
/// #Arguments
///
/// `builder`: the dispatch builder to modify
///
/// `deps`: any dependencies that must be completed before the systems run.
pub fn add_systems_to_dispatch(builder: &mut DispatcherBuilder<'static, 'static>, deps: &[&str]) {
    builder.add(index::IndexLasersSystem, INDEX_LASERS_SYSTEM_NAME, deps);
    builder.add(
        intensity::SampleLaserIntensitySystem,
        SAMPLE_INTENSITY_SYSTEM_NAME,
        &[INDEX_LASERS_SYSTEM_NAME],
    );
}

/// Registers components required by lasers to the ecs world.
pub fn register_components(world: &mut World) {
    world.register::<index::LaserIndex>();
    world.register::<gaussian::GaussianBeam>();
    world.register::<intensity::LaserIntensitySamplers>();
}
