use super::state::{Priority, ProcessState, SimCtx, Ticks};

/// Checks the engine's bookkeeping after every tick. All checks are debug
/// assertions; release builds only count steps.
#[derive(Debug)]
pub struct Observer {
    step: u64,
    last_priority: Vec<Priority>,
    last_remaining: Vec<Ticks>,
}

impl Observer {
    pub fn new(ctx: &SimCtx) -> Self {
        Self {
            step: 0,
            last_priority: ctx.records.iter().map(|r| r.priority).collect(),
            last_remaining: ctx.records.iter().map(|r| r.remaining_duration).collect(),
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        if let Some(slot) = ctx.running {
            debug_assert_eq!(
                ctx.record(slot).state,
                ProcessState::Running,
                "running slot {slot} must be in the Running state"
            );
        }

        for record in &ctx.records {
            let slot = record.slot;
            let pid = record.pid;
            let in_pending = ctx.pending.contains(slot);
            let in_ready = ctx.ready.contains(slot);

            match record.state {
                ProcessState::Pending => debug_assert!(
                    in_pending && !in_ready,
                    "Pending process {pid} must live only in the pending pool"
                ),
                ProcessState::Ready | ProcessState::Running => debug_assert!(
                    in_ready && !in_pending,
                    "Ready process {pid} must live only in the ready store"
                ),
                ProcessState::Completed => debug_assert!(
                    !in_ready && !in_pending,
                    "Completed process {pid} still present in a pool"
                ),
            }
            debug_assert!(
                record.state != ProcessState::Running || ctx.running == Some(slot),
                "Process {pid} marked Running but not selected"
            );

            if in_ready {
                debug_assert_eq!(
                    ctx.ready.priority_of(slot),
                    Some(record.priority),
                    "Ready store key for process {pid} is stale"
                );
            }

            debug_assert!(
                record.wait_since_boost < ctx.max_wait_time,
                "Process {pid} waited past the boost threshold without a boost"
            );
            debug_assert!(
                record.priority <= self.last_priority[slot],
                "Process {pid} priority was raised"
            );
            debug_assert!(
                record.remaining_duration <= self.last_remaining[slot],
                "Process {pid} remaining duration grew"
            );
            debug_assert_eq!(
                record.executed_duration + record.remaining_duration,
                record.original_duration,
                "Process {pid} executed + remaining must equal its duration"
            );

            self.last_priority[slot] = record.priority;
            self.last_remaining[slot] = record.remaining_duration;
        }
    }
}
