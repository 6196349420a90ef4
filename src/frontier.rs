use crate::error::FrontierError;

/// Binary min-heap holding search handles.
///
/// The heap never caches priorities: every comparison asks the caller's
/// `rank` closure for the current total cost of an item. Lowering an item's
/// cost after insertion therefore takes effect the next time a sift passes
/// through it, without an explicit decrease-key.
#[derive(Debug, Clone)]
pub struct Frontier<T> {
    items: Vec<T>,
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Frontier { items: Vec::new() }
    }
}

impl<T: Clone + PartialEq> Frontier<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Item at the root, if any
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Copy of every member, in heap order
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Append and sift up until the parent no longer ranks worse
    pub fn push<F>(&mut self, item: T, rank: F)
    where
        F: Fn(&T) -> u32,
    {
        self.items.push(item);
        self.sift_up(self.items.len() - 1, &rank);
    }

    /// Remove and return the lowest-ranked item
    pub fn pop<F>(&mut self, rank: F) -> Result<T, FrontierError>
    where
        F: Fn(&T) -> u32,
    {
        if self.items.is_empty() {
            return Err(FrontierError::Empty);
        }

        let best = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0, &rank);
        }
        Ok(best)
    }

    fn sift_up<F>(&mut self, mut pos: usize, rank: &F)
    where
        F: Fn(&T) -> u32,
    {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if rank(&self.items[pos]) < rank(&self.items[parent]) {
                self.items.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down<F>(&mut self, mut pos: usize, rank: &F)
    where
        F: Fn(&T) -> u32,
    {
        let len = self.items.len();
        loop {
            let first = 2 * pos + 1;
            if first >= len {
                break;
            }
            let second = first + 1;

            // Pick the better child; equal children fall back to the first
            let child = if second < len && rank(&self.items[second]) < rank(&self.items[first]) {
                second
            } else {
                first
            };

            if rank(&self.items[child]) < rank(&self.items[pos]) {
                self.items.swap(pos, child);
                pos = child;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn identity(v: &u32) -> u32 {
        *v
    }

    #[test]
    fn test_pop_in_rank_order() {
        let mut heap = Frontier::new();
        for v in [50, 10, 40, 30, 20, 60, 5] {
            heap.push(v, identity);
        }

        let mut out = Vec::new();
        while let Ok(v) = heap.pop(identity) {
            out.push(v);
        }
        assert_eq!(out, vec![5, 10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_pop_empty_fails() {
        let mut heap: Frontier<u32> = Frontier::new();
        assert_eq!(heap.pop(identity), Err(FrontierError::Empty));

        heap.push(1, identity);
        assert_eq!(heap.pop(identity), Ok(1));
        assert_eq!(heap.pop(identity), Err(FrontierError::Empty));
    }

    #[test]
    fn test_equal_ranks_all_come_out() {
        let mut heap = Frontier::new();
        let ranks: HashMap<char, u32> = [('a', 7), ('b', 7), ('c', 3), ('d', 7)].into_iter().collect();
        let rank = |c: &char| ranks[c];
        for c in ['a', 'b', 'c', 'd'] {
            heap.push(c, rank);
        }

        assert_eq!(heap.pop(rank), Ok('c'));
        let mut rest = vec![heap.pop(rank).unwrap(), heap.pop(rank).unwrap(), heap.pop(rank).unwrap()];
        rest.sort();
        assert_eq!(rest, vec!['a', 'b', 'd']);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut heap = Frontier::new();
        heap.push(3, identity);
        heap.push(1, identity);

        let mut snap = heap.snapshot();
        snap.clear();
        assert_eq!(heap.len(), 2);
        assert!(heap.contains(&3));
        assert_eq!(heap.peek(), Some(&1));
    }

    #[test]
    fn test_ranks_are_read_live() {
        let costs = RefCell::new(HashMap::from([('a', 10), ('b', 20), ('c', 30)]));
        let rank = |c: &char| costs.borrow()[c];

        let mut heap = Frontier::new();
        for c in ['a', 'b', 'c'] {
            heap.push(c, rank);
        }

        // Relax 'c' below everything without touching the heap
        costs.borrow_mut().insert('c', 1);

        // The root was ranked before the change, but the sift after
        // removing it sees the new cost
        assert_eq!(heap.pop(rank), Ok('a'));
        assert_eq!(heap.pop(rank), Ok('c'));
        assert_eq!(heap.pop(rank), Ok('b'));
    }

    #[test]
    fn test_clear() {
        let mut heap = Frontier::new();
        heap.push(4, identity);
        heap.push(2, identity);
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
    }
}
