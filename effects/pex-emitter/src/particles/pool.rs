//! Fixed-capacity particle storage

use super::particle::Particle;

/// Particle storage allocated once at construction
///
/// Live particles occupy `[0, len)`. Slots past `len` are dead and may hold
/// stale data. Removal swaps the last live particle into the freed slot, so
/// spawn order is not preserved.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Box<[Particle]>,
    count: usize,
}

impl ParticlePool {
    /// Allocate a pool holding at most `capacity` particles
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::default(); capacity].into_boxed_slice(),
            count: 0,
        }
    }

    /// Maximum number of simultaneously live particles
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Claim the next free slot
    ///
    /// Returns `None` when the pool is full. The claimed slot still holds
    /// whatever particle last lived there; the caller overwrites it.
    pub fn spawn(&mut self) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let index = self.count;
        self.count += 1;
        Some(index)
    }

    /// Remove the live particle at `index` by moving the last live particle
    /// into its slot
    ///
    /// Returns `false` if `index` is not live, which is a caller bug.
    pub fn retire(&mut self, index: usize) -> bool {
        debug_assert!(
            index < self.count,
            "retire index {index} outside live range 0..{}",
            self.count
        );
        if index >= self.count {
            return false;
        }

        let last = self.count - 1;
        if index != last {
            self.slots[index] = self.slots[last];
        }
        self.count = last;
        true
    }

    /// Live particle at `index`
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.live().get(index)
    }

    /// Mutable live particle at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.live_mut().get_mut(index)
    }

    /// All live particles
    pub fn live(&self) -> &[Particle] {
        &self.slots[..self.count]
    }

    pub fn live_mut(&mut self) -> &mut [Particle] {
        &mut self.slots[..self.count]
    }
}
