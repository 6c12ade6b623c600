use std::cmp::Ordering;

use keyed_priority_queue::KeyedPriorityQueue;

use super::{
    error::SchedError,
    state::{Pid, Priority, ProcessRecord, Slot},
};

/// Heap key of a ready process. Lower priority value wins; equal priorities
/// fall back to the lower pid so selection never depends on heap layout.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Urgency {
    pub priority: Priority,
    pub pid: Pid,
}

impl Urgency {
    pub fn of(record: &ProcessRecord) -> Self {
        Self {
            priority: record.priority,
            pid: record.pid,
        }
    }
}

// KeyedPriorityQueue is a max-heap, so the most urgent key must compare greatest
impl PartialOrd for Urgency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Urgency {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.priority, other.pid).cmp(&(self.priority, self.pid))
    }
}

/// Ready processes keyed by slot. The queue keeps a slot -> heap position
/// map, so aging can re-sift a single entry instead of rebuilding the heap.
#[derive(Debug)]
pub struct ReadyStore {
    entries: KeyedPriorityQueue<Slot, Urgency>,
}

impl ReadyStore {
    pub fn new() -> Self {
        Self {
            entries: KeyedPriorityQueue::new(),
        }
    }

    pub fn insert(&mut self, record: &ProcessRecord) -> Result<(), SchedError> {
        if self.contains(record.slot) {
            return Err(SchedError::AlreadyReady(record.pid));
        }
        self.entries.push(record.slot, Urgency::of(record));
        Ok(())
    }

    pub fn peek_min(&self) -> Result<Slot, SchedError> {
        self.entries
            .peek()
            .map(|(slot, _)| *slot)
            .ok_or(SchedError::EmptyStore)
    }

    /// Re-sifts `record` after its priority changed.
    pub fn rekey(&mut self, record: &ProcessRecord) -> Result<(), SchedError> {
        self.entries
            .set_priority(&record.slot, Urgency::of(record))
            .map(|_| ())
            .map_err(|_| SchedError::NotFound(record.pid))
    }

    pub fn remove(&mut self, record: &ProcessRecord) -> Result<(), SchedError> {
        self.entries
            .remove(&record.slot)
            .map(|_| ())
            .ok_or(SchedError::NotFound(record.pid))
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.entries.get_priority(&slot).is_some()
    }

    pub fn priority_of(&self, slot: Slot) -> Option<Priority> {
        self.entries.get_priority(&slot).map(|urgency| urgency.priority)
    }

    // Heap order, not priority order
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.entries.iter().map(|(slot, _)| *slot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ReadyStore {
    fn default() -> Self {
        Self::new()
    }
}
