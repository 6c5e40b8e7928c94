//! Latest authoritative snapshot from the service.

use crate::protocol::Bola;

/// Holds the most recent ball set and whether it changed since the last
/// rendered frame.
///
/// Starts dirty so the very first frame paints the background even before
/// any snapshot arrives.
#[derive(Debug)]
pub struct SnapshotStore {
    bolas: Vec<Bola>,
    updated: bool,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            bolas: Vec::new(),
            updated: true,
        }
    }

    /// Replace the snapshot wholesale. Bolas have no identity, so there is
    /// no merging; a bola missing from the new set simply vanishes from
    /// rendering with no transition.
    pub fn replace(&mut self, bolas: Vec<Bola>) {
        self.bolas = bolas;
        self.updated = true;
    }

    pub fn bolas(&self) -> &[Bola] {
        &self.bolas
    }

    /// Consume the dirty flag. True means the ball set may have changed
    /// and the next frame must repaint the whole surface.
    pub fn take_updated(&mut self) -> bool {
        std::mem::take(&mut self.updated)
    }

    /// Force the next frame to repaint fully, e.g. after the canvas
    /// backing store was resized and blanked.
    pub fn mark_updated(&mut self) {
        self.updated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Point;

    fn bola(x: i32, y: i32) -> Bola {
        Bola {
            c: Point { x, y },
            t: 0,
        }
    }

    #[test]
    fn starts_dirty_and_empty() {
        let mut store = SnapshotStore::new();
        assert!(store.bolas().is_empty());
        assert!(store.take_updated());
        assert!(!store.take_updated());
    }

    #[test]
    fn replace_swaps_wholesale_and_marks_dirty() {
        let mut store = SnapshotStore::new();
        store.take_updated();

        store.replace(vec![bola(1, 1), bola(2, 2)]);
        assert_eq!(store.bolas().len(), 2);
        assert!(store.take_updated());

        store.replace(vec![bola(9, 9)]);
        assert_eq!(store.bolas(), &[bola(9, 9)]);
    }

    #[test]
    fn interleaved_replaces_leave_only_the_later_snapshot() {
        let mut store = SnapshotStore::new();
        store.replace(vec![bola(1, 1), bola(2, 2)]);
        store.replace(vec![bola(3, 3)]);

        // No mixing: exactly the later set, still one dirty consumption
        assert_eq!(store.bolas(), &[bola(3, 3)]);
        assert!(store.take_updated());
        assert!(!store.take_updated());
    }

    #[test]
    fn mark_updated_forces_a_repaint() {
        let mut store = SnapshotStore::new();
        store.take_updated();
        store.mark_updated();
        assert!(store.take_updated());
    }
}
