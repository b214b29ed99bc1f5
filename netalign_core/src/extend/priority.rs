//! Indexed binary max-heap with in-place priority updates.
//!
//! Entries live in an arena of records that remember their heap position, and
//! a key index maps each key to its record, so updating or removing an
//! arbitrary entry costs `O(log n)`.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Debug)]
struct Record<K, P> {
    key: K,
    priority: P,
    /// Position of this record in `heap`.
    position: usize,
}

/// Max-heap keyed by `K` supporting increase-key, decrease-key and removal.
#[derive(Clone, Debug)]
pub struct IndexedMaxHeap<K, P> {
    records: Vec<Record<K, P>>,
    /// Arena slots freed by removals.
    free: Vec<usize>,
    /// Record slots in heap order.
    heap: Vec<usize>,
    slots: HashMap<K, usize>,
}

impl<K, P> Default for IndexedMaxHeap<K, P> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            free: Vec::new(),
            heap: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash, P: Ord> IndexedMaxHeap<K, P> {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the heap has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Priority of `key`, if present.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&P> {
        self.slots.get(key).map(|&slot| &self.records[slot].priority)
    }

    /// Highest-priority entry.
    #[must_use]
    pub fn peek(&self) -> Option<(&K, &P)> {
        self.heap.first().map(|&slot| {
            let r = &self.records[slot];
            (&r.key, &r.priority)
        })
    }

    /// Inserts `key` or replaces its priority, restoring heap order.
    pub fn push_or_update(&mut self, key: K, priority: P) {
        if let Some(&slot) = self.slots.get(&key) {
            self.records[slot].priority = priority;
            let position = self.records[slot].position;
            self.sift_up(position);
            self.sift_down(self.records[slot].position);
            return;
        }
        let position = self.heap.len();
        let record = Record {
            key,
            priority,
            position,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.records[slot] = record;
                slot
            }
            None => {
                self.records.push(record);
                self.records.len() - 1
            }
        };
        self.slots.insert(key, slot);
        self.heap.push(slot);
        self.sift_up(position);
    }

    /// Removes `key`, returning its priority.
    pub fn remove(&mut self, key: &K) -> Option<P>
    where
        P: Clone,
    {
        let slot = self.slots.remove(key)?;
        let position = self.records[slot].position;
        let last = self.heap.len() - 1;
        self.swap(position, last);
        self.heap.pop();
        if position < self.heap.len() {
            let moved = self.heap[position];
            self.sift_up(position);
            self.sift_down(self.records[moved].position);
        }
        self.free.push(slot);
        Some(self.records[slot].priority.clone())
    }

    /// Removes and returns the highest-priority entry.
    pub fn pop(&mut self) -> Option<(K, P)>
    where
        P: Clone,
    {
        let key = *self.peek()?.0;
        let priority = self.remove(&key)?;
        Some((key, priority))
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.records[self.heap[a]].position = a;
        self.records[self.heap[b]].position = b;
    }

    fn higher(&self, a: usize, b: usize) -> bool {
        self.records[self.heap[a]].priority > self.records[self.heap[b]].priority
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.higher(position, parent) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        loop {
            let (left, right) = (2 * position + 1, 2 * position + 2);
            let mut best = position;
            if left < self.heap.len() && self.higher(left, best) {
                best = left;
            }
            if right < self.heap.len() && self.higher(right, best) {
                best = right;
            }
            if best == position {
                break;
            }
            self.swap(position, best);
            position = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_remove() {
        let mut heap = IndexedMaxHeap::new();
        for (k, p) in [(1, 10), (2, 20), (3, 30), (4, 5)] {
            heap.push_or_update(k, p);
        }
        heap.push_or_update(4, 40);
        assert_eq!(heap.peek(), Some((&4, &40)));
        heap.push_or_update(4, 1);
        assert_eq!(heap.peek(), Some((&3, &30)));
        assert_eq!(heap.remove(&3), Some(30));
        assert_eq!(heap.remove(&3), None);
        assert_eq!(heap.get(&2), Some(&20));
        let drained: Vec<_> = std::iter::from_fn(|| heap.pop()).collect();
        assert_eq!(drained, vec![(2, 20), (1, 10), (4, 1)]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_slots_are_reused() {
        let mut heap = IndexedMaxHeap::new();
        heap.push_or_update('a', 1);
        heap.pop();
        heap.push_or_update('b', 2);
        assert_eq!(heap.records.len(), 1);
        assert_eq!(heap.len(), 1);
    }
}
