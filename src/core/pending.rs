use std::collections::VecDeque;

use super::state::{Pid, ProcessRecord, Slot, Ticks};

#[derive(Debug, Clone, Copy)]
struct PendingEntry {
    arrival_time: Ticks,
    pid: Pid,
    slot: Slot,
}

/// Processes that have not arrived yet, kept sorted by (arrival, pid) so
/// admission is a pop from the front.
#[derive(Debug, Default)]
pub struct PendingPool {
    entries: VecDeque<PendingEntry>,
}

impl PendingPool {
    pub fn from_records(records: &[ProcessRecord]) -> Self {
        let mut entries: Vec<PendingEntry> = records
            .iter()
            .map(|r| PendingEntry {
                arrival_time: r.arrival_time,
                pid: r.pid,
                slot: r.slot,
            })
            .collect();
        entries.sort_by(|a, b| {
            a.arrival_time
                .cmp(&b.arrival_time)
                .then_with(|| a.pid.cmp(&b.pid))
        });

        Self {
            entries: entries.into(),
        }
    }

    /// Removes and returns every slot whose arrival time is at or before `now`.
    pub fn admit_ready(&mut self, now: Ticks) -> Vec<Slot> {
        let mut admitted = Vec::new();
        while let Some(entry) = self.entries.front() {
            if entry.arrival_time > now {
                break;
            }
            admitted.push(entry.slot);
            self.entries.pop_front();
        }
        admitted
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.entries.front().map(|entry| entry.arrival_time)
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.entries.iter().any(|entry| entry.slot == slot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
