//! Insertion-ordered, bounded store of memoized call results.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CallStore<R> Layout                             │
//! │                                                                         │
//! │   map: FxHashMap<CallKey, R>        order: VecDeque<CallKey>            │
//! │        key → result                       insertion order               │
//! │                                                                         │
//! │   ┌──────────┬────────┐             ┌───────────────────────────┐       │
//! │   │ CallKey  │ Result │             │ front               back  │       │
//! │   ├──────────┼────────┤             ├───────────────────────────┤       │
//! │   │  (2)     │   4    │             │ [(2)] [(3)] [(4)]         │       │
//! │   │  (3)     │   9    │             │   ↑            ↑          │       │
//! │   │  (4)     │   16   │             │ oldest       newest       │       │
//! │   └──────────┴────────┘             │ EVICT                     │       │
//! │                                     └───────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//! Insert Flow (new key)
//! ──────────────────────
//!
//!   insert(key, result):
//!     1. capacity == 0 → reject
//!     2. key present → replace result in place (order unchanged)
//!     3. len == capacity → pop front (oldest)
//!     4. push key to back, insert into map
//!
//! Lookup never reorders: a hit does not refresh an entry's position.
//! ```
//!
//! ## Operations
//!
//! | Operation     | Time   | Notes                                  |
//! |---------------|--------|----------------------------------------|
//! | `get`         | O(1)   | Map lookup, no reordering              |
//! | `insert`      | O(1)*  | *Amortized, evicts at most one entry   |
//! |               |        | (O(n) with `debug_assertions`, which   |
//! |               |        | validate invariants on every insert)   |
//! | `pop_oldest`  | O(1)   | Front of the order queue               |
//! | `clear`       | O(n)   |                                        |
//!
//! The store never removes arbitrary keys, so `order` holds no stale
//! entries: every key in `order` is in `map` and vice versa.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::error::InvariantError;
use crate::key::CallKey;

/// Bounded mapping from [`CallKey`] to result, evicting in insertion order.
pub struct CallStore<R> {
    map: FxHashMap<CallKey, R>,
    order: VecDeque<CallKey>,
    capacity: usize,
}

impl<R> CallStore<R> {
    /// Creates a store holding at most `capacity` entries.
    ///
    /// A capacity of zero yields a store that rejects every insert.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn get(&self, key: &CallKey) -> Option<&R> {
        self.map.get(key)
    }

    #[inline]
    pub fn contains(&self, key: &CallKey) -> bool {
        self.map.contains_key(key)
    }

    /// Inserts `key → result` as the newest entry.
    ///
    /// Returns the entry evicted to make room, if any. An existing key has its
    /// result replaced without changing its position. With zero capacity the
    /// result is dropped and nothing is evicted.
    pub fn insert(&mut self, key: CallKey, result: R) -> Option<(CallKey, R)> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(slot) = self.map.get_mut(&key) {
            *slot = result;
            return None;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.pop_oldest()
        } else {
            None
        };

        self.order.push_back(key.clone());
        self.map.insert(key, result);

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        evicted
    }

    /// Removes and returns the oldest-inserted entry.
    pub fn pop_oldest(&mut self) -> Option<(CallKey, R)> {
        let key = self.order.pop_front()?;
        let result = self.map.remove(&key)?;
        Some((key, result))
    }

    /// Returns the oldest-inserted entry without removing it.
    pub fn peek_oldest(&self) -> Option<(&CallKey, &R)> {
        let key = self.order.front()?;
        self.map.get(key).map(|r| (key, r))
    }

    /// Keys from oldest to newest.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &CallKey> + '_ {
        self.order.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.map.len() >= self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();
    }

    /// Checks that the map and the order queue describe the same entries.
    ///
    /// # Errors
    ///
    /// [`InvariantError`] describing the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "map holds {} entries but order queue holds {}",
                self.map.len(),
                self.order.len()
            )));
        }
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "store holds {} entries, over capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        for key in &self.order {
            if !self.map.contains_key(key) {
                return Err(InvariantError::new(format!(
                    "key {key} in order queue is missing from map"
                )));
            }
        }
        // Equal lengths plus every queued key present means no duplicates.
        Ok(())
    }

    /// Panics on a violated invariant. Walks the whole order queue.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("CallStore invariant violated: {err}");
        }
    }
}

impl<R> std::fmt::Debug for CallStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallStore")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("order_len", &self.order.len())
            .finish_non_exhaustive()
    }
}
