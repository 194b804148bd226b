//! Bounded sliding windows for published time series
//! Location: src/sim/window.rs

use std::collections::VecDeque;

/// Fixed-capacity sliding window with oldest-first eviction.
///
/// Appending beyond capacity drops the oldest entry, so the window always
/// holds the most recent `capacity` records in insertion (time) order.
#[derive(Debug, Clone)]
pub struct SlidingWindow<T> {
    buf: VecDeque<T>,
    capacity: usize,
}

impl<T> SlidingWindow<T> {
    /// Create a window holding at most `capacity` entries.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "sliding window capacity must be non-zero");
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest entry once full.
    pub fn push(&mut self, item: T) {
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(item);
    }

    /// Most recently appended entry.
    pub fn latest(&self) -> Option<&T> {
        self.buf.back()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the window holds no entries.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Configured maximum length.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy the current contents oldest-first.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.buf.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut w = SlidingWindow::new(3);
        w.push(1);
        w.push(2);
        assert_eq!(w.len(), 2);
        assert_eq!(w.latest(), Some(&2));
    }

    #[test]
    fn test_oldest_first_eviction() {
        let mut w = SlidingWindow::new(3);
        for i in 0..5 {
            w.push(i);
        }
        assert_eq!(w.len(), 3);
        assert_eq!(w.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut w = SlidingWindow::new(8);
        for i in 0..1000 {
            w.push(i);
            assert!(w.len() <= 8);
        }
        // After N+1 appends to a length-N window the contents equal appends 2..=N+1
        assert_eq!(w.to_vec(), (992..1000).collect::<Vec<_>>());
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity_rejected() {
        let _ = SlidingWindow::<i32>::new(0);
    }
}
