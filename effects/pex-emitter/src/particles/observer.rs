//! Spawn/retire notifications for the visualization layer

/// Receives every pool mutation, synchronously and in order
///
/// After `particle_retired(index)` the particle that was last in the pool
/// (at the new `particle_count()`) lives at `index`, unless `index` itself was
/// the last slot. Renderers mirroring the pool must apply the same swap.
pub trait EmitterObserver {
    /// A particle was spawned into slot `index`
    fn particle_spawned(&mut self, index: usize);

    /// The particle in slot `index` was removed
    fn particle_retired(&mut self, index: usize);
}

/// No-op observer for headless use
impl EmitterObserver for () {
    fn particle_spawned(&mut self, _index: usize) {}

    fn particle_retired(&mut self, _index: usize) {}
}

impl<T: EmitterObserver + ?Sized> EmitterObserver for &mut T {
    fn particle_spawned(&mut self, index: usize) {
        (**self).particle_spawned(index);
    }

    fn particle_retired(&mut self, index: usize) {
        (**self).particle_retired(index);
    }
}

impl<T: EmitterObserver + ?Sized> EmitterObserver for Box<T> {
    fn particle_spawned(&mut self, index: usize) {
        (**self).particle_spawned(index);
    }

    fn particle_retired(&mut self, index: usize) {
        (**self).particle_retired(index);
    }
}

/// A recorded pool mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterEvent {
    Spawned(usize),
    Retired(usize),
}

/// Observer that buffers events for the renderer to drain once per frame
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<EmitterEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for an emitter of `capacity` particles
    ///
    /// One `advance` can fill and empty the whole pool, so draining after
    /// every `advance` keeps the queue from reallocating. Extra `emit` or
    /// `reset` calls before the drain can still grow it.
    pub fn for_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity.saturating_mul(2)),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events recorded since the last drain, oldest first
    pub fn events(&self) -> &[EmitterEvent] {
        &self.events
    }

    /// Hand out all buffered events, oldest first
    pub fn drain(&mut self) -> std::vec::Drain<'_, EmitterEvent> {
        self.events.drain(..)
    }
}

impl EmitterObserver for EventQueue {
    fn particle_spawned(&mut self, index: usize) {
        self.events.push(EmitterEvent::Spawned(index));
    }

    fn particle_retired(&mut self, index: usize) {
        self.events.push(EmitterEvent::Retired(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue_records_in_order() {
        let mut queue = EventQueue::for_capacity(4);
        queue.particle_spawned(0);
        queue.particle_spawned(1);
        queue.particle_retired(0);

        assert_eq!(
            queue.events(),
            &[
                EmitterEvent::Spawned(0),
                EmitterEvent::Spawned(1),
                EmitterEvent::Retired(0)
            ]
        );

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained.len(), 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_for_capacity_holds_a_full_pool_cycle() {
        let mut queue = EventQueue::for_capacity(3);
        let reserved = queue.events.capacity();
        assert!(reserved >= 6);

        for index in 0..3 {
            queue.particle_spawned(index);
        }
        for index in (0..3).rev() {
            queue.particle_retired(index);
        }
        assert_eq!(queue.len(), 6);
        assert_eq!(queue.events.capacity(), reserved);

        let _ = queue.drain();
        assert!(queue.is_empty());
        assert_eq!(queue.events.capacity(), reserved);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn notify<O: EmitterObserver>(mut observer: O) {
            observer.particle_spawned(7);
            observer.particle_retired(7);
        }

        let mut queue = EventQueue::new();
        notify(&mut queue);
        assert_eq!(
            queue.events(),
            &[EmitterEvent::Spawned(7), EmitterEvent::Retired(7)]
        );
    }
}
