//! A binary min-heap ordered by a caller-supplied comparator.
//!
//! Unlike [`std::collections::BinaryHeap`], the order is not tied to an
//! `Ord` impl: the queue owns a comparator and always pops an element that
//! no remaining element compares `Less` than. There is no decrease-key and
//! no deduplication; consumers skip stale entries when they pop them.

use std::cmp::Ordering;
use std::fmt;

/// Binary min-heap over `T`, ordered by `F`.
pub struct PriorityQueue<T, F = fn(&T, &T) -> Ordering> {
    heap: Vec<T>,
    cmp: F,
}

impl<T: Ord> PriorityQueue<T> {
    /// A min-heap using `T`'s natural order.
    pub fn min_heap() -> Self {
        Self::new(T::cmp)
    }
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Create an empty queue ordered by `cmp`.
    pub fn new(cmp: F) -> Self {
        Self {
            heap: Vec::new(),
            cmp,
        }
    }

    /// Create an empty queue with room for `capacity` elements.
    pub fn with_capacity(capacity: usize, cmp: F) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            cmp,
        }
    }

    /// Insert `value` in O(log n).
    pub fn push(&mut self, value: T) {
        self.heap.push(value);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return a minimum in O(log n), or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let root = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(root)
    }

    /// The current minimum, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Swap with the parent while the parent compares greater.
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if (self.cmp)(&self.heap[parent], &self.heap[idx]) != Ordering::Greater {
                break;
            }
            self.heap.swap(idx, parent);
            idx = parent;
        }
    }

    /// Swap with the smaller child while that child compares less. The right
    /// child only wins when it is strictly less than the left one.
    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = idx * 2 + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && (self.cmp)(&self.heap[right], &self.heap[left]) == Ordering::Less {
                child = right;
            }
            if (self.cmp)(&self.heap[child], &self.heap[idx]) != Ordering::Less {
                break;
            }
            self.heap.swap(idx, child);
            idx = child;
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for PriorityQueue<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.heap.len())
            .field("heap", &self.heap)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_ascending_order() {
        let mut q = PriorityQueue::min_heap();
        for v in [5, 3, 8, 1, 9, 2, 7] {
            q.push(v);
        }
        let mut out = Vec::new();
        while let Some(v) = q.pop() {
            out.push(v);
        }
        assert_eq!(out, [1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn empty_pop_is_none() {
        let mut q: PriorityQueue<i32> = PriorityQueue::min_heap();
        assert_eq!(q.pop(), None);
        assert_eq!(q.peek(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_comparator_orders_by_key() {
        let mut q = PriorityQueue::new(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
        q.push((3, 'c'));
        q.push((1, 'a'));
        q.push((2, 'b'));
        assert_eq!(q.peek(), Some(&(1, 'a')));
        assert_eq!(q.pop().map(|e| e.1), Some('a'));
        assert_eq!(q.pop().map(|e| e.1), Some('b'));
        assert_eq!(q.pop().map(|e| e.1), Some('c'));
    }

    #[test]
    fn reverse_comparator_gives_max_heap() {
        let mut q = PriorityQueue::new(|a: &i32, b: &i32| b.cmp(a));
        for v in [4, 10, 1] {
            q.push(v);
        }
        assert_eq!(q.pop(), Some(10));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut q = PriorityQueue::min_heap();
        q.push(2);
        q.push(2);
        q.push(1);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(2));
    }

    #[test]
    fn interleaved_push_pop_keeps_heap_property() {
        // Deterministic LCG so the sequence is reproducible.
        let mut state: u32 = 12345;
        let mut next = || {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            (state >> 16) % 1000
        };
        let mut q = PriorityQueue::min_heap();
        let mut mirror: Vec<u32> = Vec::new();
        let (mut pushes, mut pops) = (0usize, 0usize);
        for round in 0..2000 {
            if round % 3 == 2 && !q.is_empty() {
                let v = q.pop().unwrap();
                pops += 1;
                assert!(mirror.iter().all(|m| v <= *m));
                let pos = mirror.iter().position(|m| *m == v).unwrap();
                mirror.swap_remove(pos);
            } else {
                let v = next();
                q.push(v);
                mirror.push(v);
                pushes += 1;
            }
            assert_eq!(q.len(), pushes - pops);
        }
    }

    #[test]
    fn clear_empties_queue() {
        let mut q = PriorityQueue::with_capacity(4, |a: &u8, b: &u8| a.cmp(b));
        q.push(1);
        q.push(2);
        q.clear();
        assert!(q.is_empty());
    }
}
