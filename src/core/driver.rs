use tracing::{debug, info, trace};

use super::{
    error::SchedError,
    event::{EventSink, SchedEvent},
    observer::Observer,
    state::{SimCtx, Slot, Ticks},
};

/// Where the loop stands after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    // Both pools empty; nothing left to do
    Idle,
    // Nothing ready yet, clock advanced
    Stalled,
    Draining,
}

#[derive(Debug)]
pub struct SchedCore {
    pub ctx: SimCtx,
    observer: Observer,
}

impl SchedCore {
    pub fn new(ctx: SimCtx) -> Self {
        let observer = Observer::new(&ctx);
        Self { ctx, observer }
    }

    /// Advances the simulation by one tick: either a stalled tick, or one
    /// execution tick of the running process (selecting one first if the
    /// previous selection finished or was preempted).
    pub fn step<E: EventSink + ?Sized>(&mut self, sink: &mut E) -> Result<LoopState, SchedError> {
        let running = match self.ctx.running {
            Some(slot) => slot,
            None => {
                self.admit(sink)?;
                if self.ctx.ready.is_empty() {
                    if self.ctx.pending.is_empty() {
                        return Ok(LoopState::Idle);
                    }
                    let now = self.ctx.now;
                    debug!(at = now, next_arrival = ?self.ctx.pending.next_arrival(), "stalled");
                    sink.emit(SchedEvent::Stalled { at: now });
                    self.ctx.advance_time(1);
                    self.observer.observe(&self.ctx);
                    return Ok(LoopState::Stalled);
                }
                self.select(sink)?
            }
        };

        self.execute_tick(running, sink)?;
        self.observer.observe(&self.ctx);
        Ok(LoopState::Draining)
    }

    fn select<E: EventSink + ?Sized>(&mut self, sink: &mut E) -> Result<Slot, SchedError> {
        let slot = self.ctx.ready.peek_min()?;
        let now = self.ctx.now;
        self.ctx.admitted_since_select = false;
        self.ctx.mark_running(slot);

        let record = self.ctx.record_mut(slot);
        record.first_run.get_or_insert(now);
        debug!(pid = record.pid, priority = record.priority, at = now, "selected");
        sink.emit(SchedEvent::Running {
            pid: record.pid,
            arrival: record.arrival_time,
            duration: record.original_duration,
            remaining: record.remaining_duration,
            at: now,
        });
        Ok(slot)
    }

    fn execute_tick<E: EventSink + ?Sized>(
        &mut self,
        running: Slot,
        sink: &mut E,
    ) -> Result<(), SchedError> {
        let now = self.ctx.now;

        let (pid, remaining) = {
            let record = self.ctx.record_mut(running);
            debug_assert!(
                record.remaining_duration > 0,
                "Process {} selected with no work left",
                record.pid
            );
            record.remaining_duration = record.remaining_duration.saturating_sub(1);
            record.executed_duration += 1;
            (record.pid, record.remaining_duration)
        };
        trace!(pid, at = now, remaining, "executed");
        sink.emit(SchedEvent::Executed {
            pid,
            at: now,
            remaining,
        });

        // Aging runs before the completion check; the running process is
        // never aged, so a finishing process is unaffected either way.
        self.age_waiting(running, sink)?;

        if remaining == 0 {
            self.complete(running, sink)?;
        }

        self.ctx.advance_time(1);
        if self.admit(sink)? > 0 {
            self.ctx.admitted_since_select = true;
        }

        if remaining > 0 {
            self.check_preemption(running, sink)?;
        }
        Ok(())
    }

    fn age_waiting<E: EventSink + ?Sized>(
        &mut self,
        running: Slot,
        sink: &mut E,
    ) -> Result<(), SchedError> {
        let now = self.ctx.now;
        let max_wait = self.ctx.max_wait_time;

        let mut waiting: Vec<Slot> = self.ctx.ready.slots().filter(|&s| s != running).collect();
        waiting.sort_unstable_by_key(|&slot| self.ctx.record(slot).pid);

        for slot in waiting {
            let record = &mut self.ctx.records[slot];
            record.wait_since_boost += 1;
            record.cumulative_wait += 1;
            if record.wait_since_boost < max_wait {
                continue;
            }

            record.priority = record.priority.saturating_sub(1);
            record.wait_since_boost = 0;
            record.boosts += 1;
            let (pid, priority) = (record.pid, record.priority);

            self.ctx.ready.rekey(&self.ctx.records[slot])?;
            debug!(pid, priority, at = now, "aged");
            sink.emit(SchedEvent::Aged { pid, priority, at: now });
        }
        Ok(())
    }

    fn complete<E: EventSink + ?Sized>(
        &mut self,
        running: Slot,
        sink: &mut E,
    ) -> Result<(), SchedError> {
        let now = self.ctx.now;
        let record = self.ctx.record(running);
        let (pid, cumulative_wait) = (record.pid, record.cumulative_wait);

        info!(pid, at = now, waited = cumulative_wait, "finished");
        sink.emit(SchedEvent::Finished {
            pid,
            arrival: record.arrival_time,
            executed: record.executed_duration,
            remaining: record.remaining_duration,
            at: now,
        });

        self.ctx.total_wait += cumulative_wait;
        self.ctx.ready.remove(&self.ctx.records[running])?;
        self.ctx.mark_completed(running, now);
        Ok(())
    }

    // Only re-evaluated when something arrived during this selection or no
    // arrivals remain; a strictly more urgent ready process takes the CPU.
    fn check_preemption<E: EventSink + ?Sized>(
        &mut self,
        running: Slot,
        sink: &mut E,
    ) -> Result<(), SchedError> {
        if !(self.ctx.admitted_since_select || self.ctx.pending.is_empty()) {
            return Ok(());
        }
        if self.ctx.ready.is_empty() {
            return Ok(());
        }

        let candidate = self.ctx.ready.peek_min()?;
        let current = self.ctx.record(running);
        let challenger = self.ctx.record(candidate);
        if candidate == running || challenger.priority >= current.priority {
            return Ok(());
        }

        let (pid, by, at) = (current.pid, challenger.pid, self.ctx.now);
        debug!(pid, by, at, "preempted");
        sink.emit(SchedEvent::Preempted { pid, by, at });
        self.ctx.mark_ready(running);
        Ok(())
    }

    /// Admits every pending process whose arrival time has been reached.
    fn admit<E: EventSink + ?Sized>(&mut self, sink: &mut E) -> Result<usize, SchedError> {
        let now = self.ctx.now;
        let arrived = self.ctx.pending.admit_ready(now);

        for &slot in &arrived {
            self.ctx.mark_ready(slot);
            self.ctx.ready.insert(&self.ctx.records[slot])?;

            let record = self.ctx.record(slot);
            debug!(pid = record.pid, priority = record.priority, at = now, "admitted");
            sink.emit(SchedEvent::Admitted {
                pid: record.pid,
                priority: record.priority,
                at: now,
            });
        }
        Ok(arrived.len())
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
