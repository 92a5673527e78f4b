//! Handles indexes for laser beams.

use specs::{Component, HashMapStorage, Join, System, WriteStorage};

/// An index that uniquely identifies a laser entity.
/// The index value corresponds to the position of each laser in per-sampler arrays.
///
/// Default [LaserIndex]s are created with `initiated: false`.
/// Once the index is set, initiated is set to true.
/// This is used to detect if all lasers in the simulation are correctly indexed, in case new lasers are added.
#[derive(Clone, Copy, Default, Debug)]
pub struct LaserIndex {
    pub index: usize,
    pub initiated: bool,
}

impl Component for LaserIndex {
    type Storage = HashMapStorage<Self>;
}

/// Assigns a unique [LaserIndex] to each laser, in entity order.
pub struct IndexLasersSystem;

impl<'a> System<'a> for IndexLasersSystem {
    type SystemData = WriteStorage<'a, LaserIndex>;

    fn run(&mut self, mut indices: Self::SystemData) {
        let need_to_assign_indices = (&indices).join().any(|index| !index.initiated);
        if need_to_assign_indices {
            for (iter, index) in (&mut indices).join().enumerate() {
                index.index = iter;
                index.initiated = true;
            }
        }
    }
}
