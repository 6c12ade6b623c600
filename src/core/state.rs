use rustc_hash::FxHashMap;

use super::{pending::PendingPool, ready::ReadyStore};

// Index into the record table
pub type Slot = usize;
pub type Pid = i64;
pub type Priority = i64;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pub slot: Slot,
    pub pid: Pid,
    pub state: ProcessState,
    pub priority: Priority,
    pub initial_priority: Priority,
    pub arrival_time: Ticks,
    pub original_duration: Ticks,
    pub remaining_duration: Ticks,
    pub executed_duration: Ticks,
    pub wait_since_boost: Ticks,
    pub cumulative_wait: Ticks,
    pub boosts: u64,
    pub first_run: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl ProcessRecord {
    pub fn new(
        slot: Slot,
        pid: Pid,
        priority: Priority,
        duration: Ticks,
        arrival_time: Ticks,
    ) -> Self {
        Self {
            slot,
            pid,
            state: ProcessState::Pending,
            priority,
            initial_priority: priority,
            arrival_time,
            original_duration: duration,
            remaining_duration: duration,
            executed_duration: 0,
            wait_since_boost: 0,
            cumulative_wait: 0,
            boosts: 0,
            first_run: None,
            completion_time: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProcessState::Completed
    }
}

/// Everything one simulation run mutates: the clock, the wait accumulator,
/// the record table and the two pools that own slots into it.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub total_wait: Ticks,
    pub max_wait_time: Ticks,
    pub records: Vec<ProcessRecord>,
    pub pending: PendingPool,
    pub ready: ReadyStore,
    pub running: Option<Slot>,
    // Set once any arrival is admitted while the current selection runs
    pub admitted_since_select: bool,
    by_pid: FxHashMap<Pid, Slot>,
}

impl SimCtx {
    pub fn new(records: Vec<ProcessRecord>, max_wait_time: Ticks) -> Self {
        debug_assert!(
            records.iter().enumerate().all(|(i, r)| r.slot == i),
            "Record slot must match Vec index"
        );
        let pending = PendingPool::from_records(&records);
        let by_pid = records.iter().map(|r| (r.pid, r.slot)).collect();

        Self {
            now: 0,
            total_wait: 0,
            max_wait_time,
            records,
            pending,
            ready: ReadyStore::new(),
            running: None,
            admitted_since_select: false,
            by_pid,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn record(&self, slot: Slot) -> &ProcessRecord {
        &self.records[slot]
    }

    pub fn record_mut(&mut self, slot: Slot) -> &mut ProcessRecord {
        &mut self.records[slot]
    }

    pub fn slot_of(&self, pid: Pid) -> Option<Slot> {
        self.by_pid.get(&pid).copied()
    }

    pub fn is_drained(&self) -> bool {
        self.pending.is_empty() && self.ready.is_empty()
    }

    pub fn mark_ready(&mut self, slot: Slot) {
        let record = self.record_mut(slot);
        debug_assert!(
            matches!(record.state, ProcessState::Pending | ProcessState::Running),
            "Process {} must be pending or running to become ready",
            record.pid
        );
        record.state = ProcessState::Ready;
        if self.running == Some(slot) {
            self.running = None;
        }
    }

    pub fn mark_running(&mut self, slot: Slot) {
        debug_assert!(
            self.running.is_none(),
            "A process is already running"
        );
        let record = self.record_mut(slot);
        debug_assert_eq!(
            record.state,
            ProcessState::Ready,
            "Process {} must be ready before it runs",
            record.pid
        );
        record.state = ProcessState::Running;
        self.running = Some(slot);
    }

    pub fn mark_completed(&mut self, slot: Slot, completion_time: Ticks) {
        debug_assert!(
            !self.ready.contains(slot),
            "Completing process in slot {slot} that is still ready"
        );
        let record = self.record_mut(slot);
        debug_assert_eq!(
            record.state,
            ProcessState::Running,
            "Process {} must have been running before marked complete",
            record.pid
        );
        debug_assert_eq!(record.remaining_duration, 0);

        record.state = ProcessState::Completed;
        record.completion_time = Some(completion_time);
        self.running = None;
    }
}
