use crate::core::{Pid, Priority, ProcessRecord, Ticks};

/// One input quadruple, as parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSpec {
    pub pid: Pid,
    pub priority: Priority,
    pub duration: Ticks,
    pub arrival_time: Ticks,
}

impl ProcessSpec {
    pub fn new(pid: Pid, priority: Priority, duration: Ticks, arrival_time: Ticks) -> Self {
        Self {
            pid,
            priority,
            duration,
            arrival_time,
        }
    }
}

/// What became of a process once the run is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub duration: Ticks,
    pub executed: Ticks,
    pub initial_priority: Priority,
    pub final_priority: Priority,
    pub boosts: u64,
    pub waited: Ticks,
    pub first_run: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl From<&ProcessRecord> for ProcessOutcome {
    fn from(record: &ProcessRecord) -> Self {
        Self {
            pid: record.pid,
            arrival_time: record.arrival_time,
            duration: record.original_duration,
            executed: record.executed_duration,
            initial_priority: record.initial_priority,
            final_priority: record.priority,
            boosts: record.boosts,
            waited: record.cumulative_wait,
            first_run: record.first_run,
            completion_time: record.completion_time,
        }
    }
}

impl ProcessOutcome {
    // Completion is recorded at the start of the final tick
    pub fn turnaround(&self) -> Option<Ticks> {
        self.completion_time.map(|done| done + 1 - self.arrival_time)
    }

    pub fn response(&self) -> Option<Ticks> {
        self.first_run.map(|start| start - self.arrival_time)
    }
}
