//! Bounded recency memory over move descriptors.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// Tabu list: FIFO queue of move keys with a set for O(1) lookup.
///
/// Both views always hold the same descriptors. Inserting beyond the
/// capacity evicts the oldest entry from both.
///
/// # Examples
///
/// ```
/// use u_tabu::tabu::TabuMemory;
///
/// let mut memory = TabuMemory::new(2);
/// memory.insert('A');
/// memory.insert('B');
/// assert_eq!(memory.insert('C'), Some('A'));
/// assert!(!memory.contains(&'A'));
/// assert!(memory.contains(&'B') && memory.contains(&'C'));
/// ```
#[derive(Debug, Clone)]
pub struct TabuMemory<M> {
    capacity: usize,
    queue: VecDeque<M>,
    set: HashSet<M>,
}

impl<M: Clone + Eq + Hash> TabuMemory<M> {
    /// Creates an empty memory. A capacity of zero never holds anything.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity),
            set: HashSet::with_capacity(capacity),
        }
    }

    /// Maximum number of descriptors held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of descriptors currently held.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the memory holds nothing.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether `mv` is currently tabu.
    pub fn contains(&self, mv: &M) -> bool {
        self.set.contains(mv)
    }

    /// Records `mv` as the most recent descriptor and returns the evicted
    /// one, if any.
    ///
    /// A descriptor that is already present keeps its position.
    pub fn insert(&mut self, mv: M) -> Option<M> {
        if self.capacity == 0 || self.set.contains(&mv) {
            return None;
        }

        let mut evicted = None;
        if self.queue.len() >= self.capacity {
            if let Some(old) = self.queue.pop_front() {
                self.set.remove(&old);
                evicted = Some(old);
            }
        }

        self.queue.push_back(mv.clone());
        self.set.insert(mv);
        evicted
    }

    /// Descriptors from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.queue.iter()
    }

    /// Forgets every descriptor.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.set.clear();
    }
}

/// One [`TabuMemory`] per neighborhood class.
///
/// Owned by a search driver and mutated only between parallel rounds.
#[derive(Debug, Clone)]
pub struct TabuRegistry<M> {
    memories: HashMap<&'static str, TabuMemory<M>>,
}

impl<M> Default for TabuRegistry<M> {
    fn default() -> Self {
        Self {
            memories: HashMap::new(),
        }
    }
}

impl<M: Clone + Eq + Hash> TabuRegistry<M> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Memory of `class`, if any move of that class was ever recorded.
    pub fn memory(&self, class: &str) -> Option<&TabuMemory<M>> {
        self.memories.get(class)
    }

    /// Whether `mv` is tabu within `class`.
    pub fn is_tabu(&self, class: &str, mv: &M) -> bool {
        self.memories.get(class).is_some_and(|m| m.contains(mv))
    }

    /// Records `mv` in the memory of `class`, creating it with `capacity`
    /// on first use. Later capacities for the same class are ignored.
    pub fn record(&mut self, class: &'static str, capacity: usize, mv: M) -> Option<M> {
        self.memories
            .entry(class)
            .or_insert_with(|| TabuMemory::new(capacity))
            .insert(mv)
    }

    /// Number of classes with a memory.
    pub fn classes(&self) -> usize {
        self.memories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_memory_evicts_oldest() {
        let mut memory = TabuMemory::new(2);
        assert_eq!(memory.insert("A"), None);
        assert_eq!(memory.insert("B"), None);
        assert_eq!(memory.insert("C"), Some("A"));

        assert!(!memory.contains(&"A"));
        assert!(memory.contains(&"B"));
        assert!(memory.contains(&"C"));
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_memory_reinsert_is_noop() {
        let mut memory = TabuMemory::new(2);
        memory.insert(1);
        memory.insert(2);
        assert_eq!(memory.insert(1), None);
        assert_eq!(memory.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_memory_zero_capacity() {
        let mut memory = TabuMemory::new(0);
        assert_eq!(memory.insert((0, 1, 2, 3)), None);
        assert!(memory.is_empty());
        assert!(!memory.contains(&(0, 1, 2, 3)));
    }

    #[test]
    fn test_memory_clear() {
        let mut memory = TabuMemory::new(3);
        memory.insert(7);
        memory.clear();
        assert!(memory.is_empty());
        assert!(!memory.contains(&7));
    }

    #[test]
    fn test_registry_keeps_classes_apart() {
        let mut registry = TabuRegistry::new();
        registry.record("swap", 1, 10);
        registry.record("move", 5, 10);
        registry.record("swap", 99, 11);

        assert!(!registry.is_tabu("swap", &10));
        assert!(registry.is_tabu("swap", &11));
        assert!(registry.is_tabu("move", &10));
        assert!(!registry.is_tabu("other", &10));
        assert_eq!(registry.memory("swap").map(|m| m.capacity()), Some(1));
        assert_eq!(registry.classes(), 2);
    }

    proptest! {
        #[test]
        fn prop_memory_holds_most_recent(capacity in 1usize..16, n in 0usize..64) {
            let mut memory = TabuMemory::new(capacity);
            for i in 0..n {
                memory.insert(i);
            }

            let kept = n.min(capacity);
            prop_assert_eq!(memory.len(), kept);
            for i in 0..n {
                prop_assert_eq!(memory.contains(&i), i >= n - kept);
            }
            let expected: Vec<usize> = (n - kept..n).collect();
            prop_assert_eq!(memory.iter().copied().collect::<Vec<_>>(), expected);
        }
    }
}
