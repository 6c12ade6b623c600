use crate::core::{Pid, Priority, Ticks};

#[derive(Debug, Clone, PartialEq)]
pub enum SchedEvent {
    // One per input record, in input order, before anything runs
    Listed {
        pid: Pid,
        priority: Priority,
        duration: Ticks,
        arrival: Ticks,
    },
    Started {
        max_wait_time: Ticks,
    },
    Admitted {
        pid: Pid,
        priority: Priority,
        at: Ticks,
    },
    // Nothing ready; time advanced without execution
    Stalled {
        at: Ticks,
    },
    Running {
        pid: Pid,
        arrival: Ticks,
        duration: Ticks,
        remaining: Ticks,
        at: Ticks,
    },
    Executed {
        pid: Pid,
        at: Ticks,
        remaining: Ticks,
    },
    Aged {
        pid: Pid,
        priority: Priority,
        at: Ticks,
    },
    Preempted {
        pid: Pid,
        by: Pid,
        at: Ticks,
    },
    Finished {
        pid: Pid,
        arrival: Ticks,
        executed: Ticks,
        remaining: Ticks,
        at: Ticks,
    },
    Summary {
        finished_at: Ticks,
        total_wait: Ticks,
        average_wait: f64,
    },
}

pub trait EventSink {
    fn emit(&mut self, event: SchedEvent);
}

impl EventSink for Vec<SchedEvent> {
    fn emit(&mut self, event: SchedEvent) {
        self.push(event);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: SchedEvent) {}
}
