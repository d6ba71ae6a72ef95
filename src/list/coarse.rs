//! Coarse-grained locked sorted list
//!
//! A single mutex serializes every operation in full: no two operations,
//! not even two searches, ever run concurrently. Inside the critical
//! section the chain is plain exclusively-owned data, so splicing and
//! unlinking need no further care.

use parking_lot::Mutex;

use super::ops::ListOps;

type Link = Option<Box<Node>>;

struct Node {
    value: i64,
    next: Link,
}

/// Sorted integer set guarded by one list-wide mutex.
pub struct CoarseList {
    head: Mutex<Link>,
}

impl CoarseList {
    pub fn new() -> Self {
        Self {
            head: Mutex::new(None),
        }
    }

    /// Copy out the chain in order. Holds the list lock for the duration.
    pub fn snapshot(&self) -> Vec<i64> {
        let head = self.head.lock();
        let mut values = Vec::new();
        let mut curr = head.as_deref();
        while let Some(node) = curr {
            values.push(node.value);
            curr = node.next.as_deref();
        }
        values
    }

    /// Number of values currently in the set.
    pub fn len(&self) -> usize {
        let head = self.head.lock();
        let mut count = 0;
        let mut curr = head.as_deref();
        while let Some(node) = curr {
            count += 1;
            curr = node.next.as_deref();
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.head.lock().is_none()
    }
}

impl ListOps for CoarseList {
    fn insert(&self, value: i64) -> bool {
        let mut head = self.head.lock();

        // Walk to the first link whose node does not sort before the target.
        let mut link = &mut *head;
        while link.as_ref().map_or(false, |node| node.value < value) {
            link = &mut link.as_mut().unwrap().next;
        }

        match link {
            Some(node) if node.value == value => false,
            _ => {
                let next = link.take();
                *link = Some(Box::new(Node { value, next }));
                true
            }
        }
    }

    fn delete(&self, value: i64) -> bool {
        let mut head = self.head.lock();

        let mut link = &mut *head;
        while link.as_ref().map_or(false, |node| node.value < value) {
            link = &mut link.as_mut().unwrap().next;
        }

        match link.take() {
            Some(node) if node.value == value => {
                *link = node.next;
                true
            }
            // Not the target (or end of chain): put it back untouched.
            other => {
                *link = other;
                false
            }
        }
    }

    fn search(&self, value: i64) -> bool {
        let head = self.head.lock();
        let mut curr = head.as_deref();
        while let Some(node) = curr {
            if node.value == value {
                return true;
            }
            if node.value > value {
                // Sorted order: the value cannot appear further down.
                return false;
            }
            curr = node.next.as_deref();
        }
        false
    }
}

impl Default for CoarseList {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CoarseList {
    fn drop(&mut self) {
        // Detach node by node; the derived drop would recurse chain-deep.
        let mut curr = self.head.get_mut().take();
        while let Some(mut node) = curr {
            curr = node.next.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_insert_sorted() {
        let list = CoarseList::new();

        assert!(list.insert(30));
        assert!(list.insert(10));
        assert!(list.insert(20));

        assert_eq!(list.snapshot(), vec![10, 20, 30]);
    }

    #[test]
    fn test_insert_duplicate() {
        let list = CoarseList::new();

        assert!(list.insert(5));
        assert!(!list.insert(5));

        assert_eq!(list.snapshot(), vec![5]);
    }

    #[test]
    fn test_delete() {
        let list = CoarseList::new();
        for v in [1, 2, 3] {
            list.insert(v);
        }

        // Head, middle, absent
        assert!(list.delete(1));
        assert!(list.delete(2));
        assert!(!list.delete(42));

        assert_eq!(list.snapshot(), vec![3]);
    }

    #[test]
    fn test_delete_empty() {
        let list = CoarseList::new();
        assert!(!list.delete(0));
    }

    #[test]
    fn test_search() {
        let list = CoarseList::new();
        for v in [10, 20, 30] {
            list.insert(v);
        }

        assert!(list.search(20));
        assert!(!list.search(15));
        assert!(!list.search(99));
        assert!(!list.search(-1));
    }

    #[test]
    fn test_negative_values() {
        let list = CoarseList::new();
        for v in [0, -5, 7, -20] {
            list.insert(v);
        }

        assert_eq!(list.snapshot(), vec![-20, -5, 0, 7]);
        assert!(list.delete(-5));
        assert_eq!(list.snapshot(), vec![-20, 0, 7]);
    }

    #[test]
    fn test_matches_reference_model() {
        let list = CoarseList::new();
        let mut model = BTreeSet::new();

        // Deterministic churn over a small value domain so inserts and
        // deletes collide with existing values often.
        for i in 0..1000i64 {
            let value = (i * 17) % 23;
            if i % 3 == 0 {
                assert_eq!(list.delete(value), model.remove(&value));
            } else {
                assert_eq!(list.insert(value), model.insert(value));
            }
        }

        assert_eq!(list.snapshot(), model.iter().copied().collect::<Vec<_>>());
        for value in 0..23i64 {
            assert_eq!(list.search(value), model.contains(&value));
        }
    }

    #[test]
    fn test_len() {
        let list = CoarseList::new();
        assert!(list.is_empty());

        for v in 0..50 {
            list.insert(v);
        }
        assert_eq!(list.len(), 50);

        list.delete(25);
        assert_eq!(list.len(), 49);
    }

    #[test]
    fn test_concurrent_disjoint_inserts() {
        let list = Arc::new(CoarseList::new());
        let num_threads = 8;
        let per_thread = 200i64;

        let handles: Vec<_> = (0..num_threads)
            .map(|t| {
                let list = Arc::clone(&list);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        assert!(list.insert(t as i64 * per_thread + i));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = list.snapshot();
        assert_eq!(snapshot.len(), num_threads * per_thread as usize);
        assert!(snapshot.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_concurrent_toggle_accounting() {
        // The mutex serializes every operation, so across all threads the
        // successful inserts of one value minus its successful deletes must
        // equal its final membership.
        let list = Arc::new(CoarseList::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let list = Arc::clone(&list);
                thread::spawn(move || {
                    let mut inserted = 0i64;
                    let mut deleted = 0i64;
                    for i in 0..1000 {
                        if i % 2 == 0 {
                            if list.insert(7) {
                                inserted += 1;
                            }
                        } else if list.delete(7) {
                            deleted += 1;
                        }
                    }
                    (inserted, deleted)
                })
            })
            .collect();

        let (inserted, deleted) = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .fold((0, 0), |acc, x| (acc.0 + x.0, acc.1 + x.1));

        assert_eq!(inserted - deleted, list.search(7) as i64);
    }

    #[test]
    fn test_drop_long_chain() {
        // Exercises the iterative Drop; a recursive teardown would blow the
        // stack at this depth.
        let list = CoarseList::new();
        for v in 0..100_000 {
            list.insert(v);
        }
        drop(list);
    }
}
