//! Short-term memory of recently exchanged operation pairs.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::encoding::ResourceOrder;
use crate::models::Operation;
use crate::neighborhood::Swap;

/// Identity of a move, independent of positions.
///
/// A swap and its inverse exchange the same two operations on the same
/// machine, so they share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabooKey {
    machine: usize,
    pair: (Operation, Operation),
}

impl TabooKey {
    /// Key of exchanging `a` and `b` on `machine`, in either direction.
    pub fn new(machine: usize, a: Operation, b: Operation) -> Self {
        Self {
            machine,
            pair: (a.min(b), a.max(b)),
        }
    }

    /// Key of `swap` applied to `order`.
    pub fn of(swap: &Swap, order: &ResourceOrder) -> Self {
        let (a, b) = swap.operations(order);
        Self::new(swap.machine, a, b)
    }

    /// Machine of the move.
    pub fn machine(&self) -> usize {
        self.machine
    }

    /// Exchanged operations, smaller first.
    pub fn operations(&self) -> (Operation, Operation) {
        self.pair
    }
}

/// Taboo list with iteration-based expiry.
///
/// A key inserted at iteration `i` stays taboo through iteration
/// `i + tenure` and is purged once the iteration counter passes that value.
#[derive(Debug, Clone, Default)]
pub struct TabooList {
    tenure: usize,
    expiry: HashMap<TabooKey, usize>,
    queue: VecDeque<(TabooKey, usize)>,
}

impl TabooList {
    /// Creates an empty list with the given tenure.
    pub fn new(tenure: usize) -> Self {
        Self {
            tenure,
            expiry: HashMap::new(),
            queue: VecDeque::new(),
        }
    }

    /// Number of iterations an inserted key stays taboo.
    pub fn tenure(&self) -> usize {
        self.tenure
    }

    /// Makes `key` taboo from `iteration` on.
    pub fn insert(&mut self, key: TabooKey, iteration: usize) {
        let expiry = iteration.saturating_add(self.tenure);
        self.expiry.insert(key, expiry);
        self.queue.push_back((key, expiry));
    }

    /// Drops every key whose expiry is before `iteration`.
    pub fn purge(&mut self, iteration: usize) {
        while let Some(&(key, expiry)) = self.queue.front() {
            if expiry >= iteration {
                break;
            }
            self.queue.pop_front();
            // a re-inserted key keeps its later expiry
            if self.expiry.get(&key) == Some(&expiry) {
                self.expiry.remove(&key);
            }
        }
    }

    /// Whether `key` is currently taboo.
    pub fn contains(&self, key: &TabooKey) -> bool {
        self.expiry.contains_key(key)
    }

    /// Number of taboo keys.
    pub fn len(&self) -> usize {
        self.expiry.len()
    }

    /// Whether no key is taboo.
    pub fn is_empty(&self) -> bool {
        self.expiry.is_empty()
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.expiry.clear();
        self.queue.clear();
    }
}
