//! Calculate the intensity of laser beams

use super::gaussian::{get_gaussian_beam_intensity, GaussianBeam};
use super::index::LaserIndex;
use crate::atom::Position;
use specs::{Component, Join, ReadStorage, System, VecStorage, WriteStorage};

/// Represents the laser intensity at the position of the sampler with respect to a certain laser beam
#[derive(Clone, Copy, Debug)]
pub struct LaserIntensitySampler {
    /// Intensity in SI units of W/m^2
    pub intensity: f64,
}

impl Default for LaserIntensitySampler {
    fn default() -> Self {
        LaserIntensitySampler {
            intensity: f64::NAN,
        }
    }
}

/// Component that holds a list of `LaserIntensitySampler`s, one per laser.
#[derive(Clone, Default, Debug)]
pub struct LaserIntensitySamplers {
    pub contents: Vec<LaserIntensitySampler>,
}

impl Component for LaserIntensitySamplers {
    type Storage = VecStorage<Self>;
}

/// System that calculates the intensity of [GaussianBeam] lasers at the [Position] of each [LaserIntensitySamplers].
///
/// The sampler arrays are resized to the number of lasers before sampling.
pub struct SampleLaserIntensitySystem;

impl<'a> System<'a> for SampleLaserIntensitySystem {
    type SystemData = (
        ReadStorage<'a, LaserIndex>,
        ReadStorage<'a, GaussianBeam>,
        WriteStorage<'a, LaserIntensitySamplers>,
        ReadStorage<'a, Position>,
    );

    fn run(&mut self, (indices, gaussian, mut samplers, positions): Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        // There are typically only a small number of lasers in a simulation, so cache them
        // before distributing the sampler loop over parallel workers.
        let lasers: Vec<(LaserIndex, GaussianBeam)> = (&indices, &gaussian)
            .join()
            .map(|(index, beam)| (*index, *beam))
            .collect();
        let number = lasers.len();

        (&mut samplers, &positions)
            .par_join()
            .for_each(|(sampler, pos)| {
                sampler.contents = vec![LaserIntensitySampler::default(); number];
                for (index, beam) in lasers.iter() {
                    sampler.contents[index.index].intensity =
                        get_gaussian_beam_intensity(beam, pos);
                }
            });
    }
}
