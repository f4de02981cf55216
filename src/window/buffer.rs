use std::collections::{HashSet, VecDeque};

/// Bounded, deduplicated, insertion-ordered buffer of distinct numbers.
///
/// Holds at most `capacity` values, oldest first. Inserting a value that is
/// already present is a no-op: the existing element keeps its position and is
/// never refreshed. Inserting a new value into a full buffer evicts the
/// oldest element first. A value that was evicted earlier and is seen again
/// re-enters as the newest element.
#[derive(Debug, Clone)]
pub struct NumberWindow {
    values: VecDeque<i64>,
    members: HashSet<i64>,
    capacity: usize,
}

impl NumberWindow {
    /// Create an empty window. `capacity` must be greater than 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be greater than 0");
        Self {
            values: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert a value unless it is already present. Evicts the oldest element
    /// first when the window is at capacity. Returns true if the value was
    /// actually inserted.
    pub fn insert(&mut self, value: i64) -> bool {
        if self.members.contains(&value) {
            return false;
        }
        if self.values.len() == self.capacity {
            if let Some(evicted) = self.values.pop_front() {
                self.members.remove(&evicted);
            }
        }
        self.values.push_back(value);
        self.members.insert(value);
        true
    }

    /// Copy of the current contents, oldest first.
    pub fn snapshot(&self) -> Vec<i64> {
        self.values.iter().copied().collect()
    }

    /// Arithmetic mean of the current contents, rounded to 2 decimal places.
    /// Returns 0.0 for an empty window.
    pub fn average(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.values.iter().map(|&v| v as f64).sum();
        round2(sum / self.values.len() as f64)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.members.contains(&value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Round to 2 decimal places, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
