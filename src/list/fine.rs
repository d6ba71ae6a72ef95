//! Fine-grained locked sorted list
//!
//! One mutex per node plus a list-level mutex guarding only the head link.
//! Traversal is hand-over-hand (lock coupling): the successor's lock is
//! acquired before the lock currently held is released, so no writer can
//! complete an unlink or splice across a two-node boundary a traversing
//! thread is about to cross.
//!
//! Every operation acquires locks in strictly increasing list position,
//! successor only after predecessor, so no cyclic wait can form. That
//! ordering is the entire deadlock-freedom argument and must survive any
//! edit to this file.

use std::sync::Arc;

use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};

use super::ops::ListOps;

type NodeRef = Arc<Mutex<FineNode>>;
type Link = Option<NodeRef>;
type NodeGuard = ArcMutexGuard<RawMutex, FineNode>;

/// A chain node. The node's mutex guards the whole record: the immutable
/// value and the `next` link. A thread may read or rewrite `next` only
/// while holding this node's lock.
struct FineNode {
    value: i64,
    next: Link,
}

impl FineNode {
    fn link(value: i64, next: Link) -> NodeRef {
        Arc::new(Mutex::new(FineNode { value, next }))
    }
}

/// Sorted integer set with per-node locks traversed hand-over-hand.
///
/// Node handles are reference-counted. Unlinking drops the chain's handle;
/// the node is freed once the last outstanding handle (at most the
/// unlinking thread's own guard) drops. Lock coupling guarantees no new
/// thread can reach a node after its predecessor's link is rewritten, so
/// no further reclamation machinery is needed.
pub struct FineList {
    /// Guards the head link only, never traversal beyond the first node.
    head: Mutex<Link>,
}

impl FineList {
    pub fn new() -> Self {
        Self {
            head: Mutex::new(None),
        }
    }

    /// Copy out the chain in order via a coupled traversal.
    ///
    /// Holds at most two node locks at any instant, like every other
    /// operation, so it can run concurrently with mutations on regions it
    /// has already passed.
    pub fn snapshot(&self) -> Vec<i64> {
        let mut values = Vec::new();

        let head = self.head.lock();
        let first = match head.as_ref() {
            None => return values,
            Some(first) => Arc::clone(first),
        };
        let mut curr = first.lock_arc();
        drop(head);

        loop {
            values.push(curr.value);
            let next = match curr.next.as_ref() {
                None => return values,
                Some(next) => Arc::clone(next),
            };
            // The assignment locks the successor before the old guard drops.
            curr = next.lock_arc();
        }
    }

    /// Number of values currently in the set.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.lock().is_none()
    }
}

impl ListOps for FineList {
    fn insert(&self, value: i64) -> bool {
        let mut head = self.head.lock();
        let first = match head.as_ref() {
            None => {
                *head = Some(FineNode::link(value, None));
                return true;
            }
            Some(first) => Arc::clone(first),
        };
        let mut curr = first.lock_arc();

        if curr.value >= value {
            if curr.value == value {
                return false;
            }
            // New head: splice in front of the locked first node.
            let rest = head.take();
            *head = Some(FineNode::link(value, rest));
            return true;
        }
        // The first node is locked; the head link no longer concerns us.
        drop(head);

        loop {
            // Invariant: exactly one lock held and curr.value < value.
            let next = match curr.next.as_ref() {
                None => {
                    curr.next = Some(FineNode::link(value, None));
                    return true;
                }
                Some(next) => Arc::clone(next),
            };
            // Couple: take the successor's lock before giving up curr's.
            let next_guard: NodeGuard = next.lock_arc();

            if next_guard.value >= value {
                if next_guard.value == value {
                    return false;
                }
                // Splice between curr and its successor. Only curr.next
                // changes, and curr's lock is held.
                drop(next_guard);
                let tail = curr.next.take();
                curr.next = Some(FineNode::link(value, tail));
                return true;
            }

            curr = next_guard;
        }
    }

    fn delete(&self, value: i64) -> bool {
        let mut head = self.head.lock();
        let first = match head.as_ref() {
            None => return false,
            Some(first) => Arc::clone(first),
        };
        let mut curr = first.lock_arc();

        if curr.value >= value {
            if curr.value > value {
                return false;
            }
            // Head removal happens under the head mutex. Holding the first
            // node's lock too means no traverser is inside it when it
            // detaches, and clearing its link keeps the detached node from
            // leading anywhere.
            *head = curr.next.take();
            return true;
        }
        drop(head);

        loop {
            let next = match curr.next.as_ref() {
                None => return false,
                Some(next) => Arc::clone(next),
            };
            let mut next_guard: NodeGuard = next.lock_arc();

            if next_guard.value == value {
                // Unlink under both locks. The removed node's lock drops
                // first at return, then curr's; the handles reclaim it.
                curr.next = next_guard.next.take();
                return true;
            }
            if next_guard.value > value {
                return false;
            }

            curr = next_guard;
        }
    }

    fn search(&self, value: i64) -> bool {
        let head = self.head.lock();
        let first = match head.as_ref() {
            None => return false,
            Some(first) => Arc::clone(first),
        };
        let mut curr = first.lock_arc();
        drop(head);

        loop {
            if curr.value == value {
                return true;
            }
            if curr.value > value {
                return false;
            }
            let next = match curr.next.as_ref() {
                None => return false,
                Some(next) => Arc::clone(next),
            };
            curr = next.lock_arc();
        }
    }
}

impl Default for FineList {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FineList {
    fn drop(&mut self) {
        // Detach node by node; dropping the whole chain through the Arcs
        // would recurse chain-deep.
        let mut curr = self.head.get_mut().take();
        while let Some(node) = curr {
            match Arc::try_unwrap(node) {
                Ok(mutex) => {
                    let mut node = mutex.into_inner();
                    curr = node.next.take();
                }
                // A handle is still live somewhere; leave the rest of the
                // chain to ordinary refcounted teardown.
                Err(_) => break,
            }
        }
    }
}
