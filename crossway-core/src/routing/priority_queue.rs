use std::{cmp::Ordering, collections::BinaryHeap};

struct Entry<K, P> {
    priority: P,
    seq: u64,
    key: K,
}

// Implement Ord for Entry to use in BinaryHeap
impl<K, P: PartialOrd> Ord for Entry<K, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap by priority, earlier insertions first among equals
        self.priority
            .partial_cmp(&other.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<K, P: PartialOrd> PartialOrd for Entry<K, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, P: PartialOrd> PartialEq for Entry<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K, P: PartialOrd> Eq for Entry<K, P> {}

/// Max-priority queue: the highest priority pops first, equal priorities pop
/// in insertion order.
pub struct PriorityQueue<K, P> {
    heap: BinaryHeap<Entry<K, P>>,
    seq: u64,
}

impl<K, P: PartialOrd> Default for PriorityQueue<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P: PartialOrd> PriorityQueue<K, P> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn push(&mut self, key: K, priority: P) {
        self.heap.push(Entry {
            priority,
            seq: self.seq,
            key,
        });
        self.seq += 1;
    }

    pub fn pop(&mut self) -> Option<(K, P)> {
        self.heap.pop().map(|entry| (entry.key, entry.priority))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_highest_priority_first() {
        let mut queue = PriorityQueue::new();
        queue.push("a", 1.0);
        queue.push("b", 3.0);
        queue.push("c", -2.0);
        queue.push("d", 2.5);

        let order: Vec<_> = std::iter::from_fn(|| queue.pop()).map(|(k, _)| k).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let mut queue = PriorityQueue::new();
        for key in [5, 1, 4, 2] {
            queue.push(key, 0.0);
        }
        queue.push(9, 1.0);
        assert_eq!(queue.len(), 5);

        let order: Vec<_> = std::iter::from_fn(|| queue.pop()).map(|(k, _)| k).collect();
        assert_eq!(order, vec![9, 5, 1, 4, 2]);
    }

    #[test]
    fn empty_queue_pops_nothing() {
        let mut queue: PriorityQueue<i64, f64> = PriorityQueue::default();
        assert!(queue.pop().is_none());
    }
}
