//! Bounded pool of transient debug markers

use lassoview_core::Point3f;
use std::collections::VecDeque;

/// A visual annotation owning graphics resources
pub trait DebugMarker {
    /// Free the marker's graphics resources. Called exactly once by the pool.
    fn release(&mut self);
}

/// Creates markers in the host's renderer
pub trait MarkerFactory {
    fn create(&mut self, position: Point3f) -> Box<dyn DebugMarker>;
}

/// FIFO pool that never holds more than `capacity` markers.
///
/// Inserting into a full pool releases the oldest markers first. Everything still
/// held is released on [`MarkerPool::clear`] or when the pool is dropped.
pub struct MarkerPool {
    markers: VecDeque<Box<dyn DebugMarker>>,
    capacity: usize,
}

impl MarkerPool {
    /// Create a pool; a zero capacity is raised to one
    pub fn new(capacity: usize) -> Self {
        Self {
            markers: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn insert(&mut self, marker: Box<dyn DebugMarker>) {
        if self.markers.len() >= self.capacity {
            let excess = self.markers.len() - self.capacity + 1;
            for mut old in self.markers.drain(..excess) {
                old.release();
            }
        }
        self.markers.push_back(marker);
    }

    pub fn clear(&mut self) {
        for mut marker in self.markers.drain(..) {
            marker.release();
        }
    }
}

impl Drop for MarkerPool {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for MarkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerPool")
            .field("len", &self.markers.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
