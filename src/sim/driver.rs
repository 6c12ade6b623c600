use average::Estimate;
use rustc_hash::FxHashSet;
use tracing::info;

use super::job::{ProcessOutcome, ProcessSpec};
use crate::core::{
    DEFAULT_MAX_WAIT_TIME, EventSink, LoopState, Pid, ProcessRecord, ProcessState, SchedCore,
    SchedError, SchedEvent, SimCtx, Ticks,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub max_wait_time: Ticks,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_wait_time: DEFAULT_MAX_WAIT_TIME,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub finished_at: Ticks,
    pub processes: usize,
    pub total_wait: Ticks,
    pub average_wait: f64,
    pub mean_turnaround: f64,
    pub mean_response: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimReport {
    pub summary: Summary,
    pub outcomes: Vec<ProcessOutcome>,
}

#[derive(Debug)]
pub struct Sim {
    pub core: SchedCore,
    // Input order, for the initial listing
    listing: Vec<ProcessSpec>,
    config: SimConfig,
}

impl Sim {
    pub fn new(specs: Vec<ProcessSpec>, config: SimConfig) -> Result<Self, SchedError> {
        if specs.is_empty() {
            return Err(SchedError::NoProcesses);
        }
        if config.max_wait_time == 0 {
            return Err(SchedError::ZeroMaxWait);
        }

        let mut seen = FxHashSet::default();
        for spec in &specs {
            if !seen.insert(spec.pid) {
                return Err(SchedError::DuplicateId(spec.pid));
            }
            if spec.duration == 0 {
                return Err(SchedError::ZeroDuration(spec.pid));
            }
        }

        let records = specs
            .iter()
            .enumerate()
            .map(|(slot, spec)| {
                ProcessRecord::new(slot, spec.pid, spec.priority, spec.duration, spec.arrival_time)
            })
            .collect();
        let ctx = SimCtx::new(records, config.max_wait_time);

        Ok(Self {
            core: SchedCore::new(ctx),
            listing: specs,
            config,
        })
    }

    pub fn step<E: EventSink + ?Sized>(&mut self, sink: &mut E) -> Result<LoopState, SchedError> {
        self.core.step(sink)
    }

    /// Runs every process to completion and reports the totals.
    pub fn run<E: EventSink + ?Sized>(mut self, sink: &mut E) -> Result<SimReport, SchedError> {
        for spec in &self.listing {
            sink.emit(SchedEvent::Listed {
                pid: spec.pid,
                priority: spec.priority,
                duration: spec.duration,
                arrival: spec.arrival_time,
            });
        }
        sink.emit(SchedEvent::Started {
            max_wait_time: self.config.max_wait_time,
        });

        while self.step(sink)? != LoopState::Idle {}

        Ok(self.finish(sink))
    }

    fn finish<E: EventSink + ?Sized>(self, sink: &mut E) -> SimReport {
        let ctx = &self.core.ctx;
        debug_assert!(ctx.is_drained());
        debug_assert!(ctx.records.iter().all(ProcessRecord::is_completed));

        // The clock has already moved past the last executed tick
        let finished_at = ctx.now.saturating_sub(1);
        let processes = ctx.records.len();
        let average_wait = ctx.total_wait as f64 / processes as f64;
        let outcomes = self.outcomes();

        let summary = Summary {
            finished_at,
            processes,
            total_wait: ctx.total_wait,
            average_wait,
            mean_turnaround: mean(outcomes.iter().filter_map(ProcessOutcome::turnaround)),
            mean_response: mean(outcomes.iter().filter_map(ProcessOutcome::response)),
        };
        info!(
            finished_at,
            total_wait = summary.total_wait,
            average_wait,
            ticks = self.core.observer().steps(),
            "all processes finished"
        );
        sink.emit(SchedEvent::Summary {
            finished_at,
            total_wait: summary.total_wait,
            average_wait,
        });

        SimReport { summary, outcomes }
    }

    pub fn outcomes(&self) -> Vec<ProcessOutcome> {
        self.core.ctx.records.iter().map(ProcessOutcome::from).collect()
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    pub fn record(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.core.ctx.slot_of(pid).map(|slot| self.core.ctx.record(slot))
    }

    pub fn running(&self) -> Option<Pid> {
        self.core.ctx.running.map(|slot| self.core.ctx.record(slot).pid)
    }

    pub fn state_of(&self, pid: Pid) -> Option<ProcessState> {
        self.record(pid).map(|record| record.state)
    }

    pub fn total_wait(&self) -> Ticks {
        self.core.ctx.total_wait
    }
}

fn mean(values: impl Iterator<Item = Ticks>) -> f64 {
    values.map(|v| v as f64).collect::<average::Mean>().estimate()
}
