use std::io::{self, Write};

use tracing::debug;

use crate::core::{EventSink, SchedEvent};

/// Renders scheduling events as the line-oriented execution trace.
/// The first write error is kept and returned by [`TextReport::finish`];
/// later events are dropped.
pub struct TextReport<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_event(&mut self, event: &SchedEvent) -> io::Result<()> {
        let out = &mut self.out;
        match *event {
            SchedEvent::Listed {
                pid,
                priority,
                duration,
                arrival,
            } => writeln!(
                out,
                "Id = {pid}, priority = {priority}, duration = {duration}, arrival time = {arrival}"
            ),
            SchedEvent::Started { max_wait_time } => {
                writeln!(out)?;
                writeln!(out, "Maximum wait time = {max_wait_time}")?;
                writeln!(out)
            }
            SchedEvent::Running {
                pid,
                arrival,
                duration,
                remaining,
                at,
            } => {
                writeln!(out, "Now running Process id = {pid}")?;
                writeln!(out, "Arrival = {arrival}")?;
                writeln!(out, "Duration = {duration}")?;
                writeln!(out, "Run time left = {remaining}")?;
                writeln!(out, " at time {at}")
            }
            SchedEvent::Executed { pid, at, remaining } => {
                writeln!(out, "Executed process ID:{pid}, at time {at} Remaining: {remaining}")
            }
            SchedEvent::Aged { pid, priority, .. } => writeln!(
                out,
                "Process {pid} reached maximum wait time... decreasing priority to {priority}"
            ),
            SchedEvent::Finished {
                pid,
                arrival,
                executed,
                remaining,
                at,
            } => {
                writeln!(out, "Finished running Process id = {pid}")?;
                writeln!(out, "Arrival = {arrival}")?;
                writeln!(out, "Duration = {executed}")?;
                writeln!(out, "Run time left = {remaining}")?;
                writeln!(out, " at time {at}")
            }
            SchedEvent::Summary {
                finished_at,
                average_wait,
                ..
            } => {
                writeln!(out, "Finished running all processes at time {finished_at}")?;
                // Debug formatting keeps the decimal point on whole numbers. It never
                // switches to exponent form: 1e7 prints as `10000000.0`, not `1.0E7`
                writeln!(out, "Average Wait Time: {average_wait:?}")
            }
            SchedEvent::Admitted { .. }
            | SchedEvent::Stalled { .. }
            | SchedEvent::Preempted { .. } => {
                debug!(?event, "not part of the text trace");
                Ok(())
            }
        }
    }
}

impl<W: Write> EventSink for TextReport<W> {
    fn emit(&mut self, event: SchedEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_event(&event) {
            self.error = Some(err);
        }
    }
}
