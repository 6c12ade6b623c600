pub mod driver;
pub mod error;
pub mod event;
pub mod observer;
pub mod pending;
pub mod ready;
pub mod state;

pub use driver::{LoopState, SchedCore};
pub use error::SchedError;
pub use event::{EventSink, NullSink, SchedEvent};
pub use pending::PendingPool;
pub use ready::{ReadyStore, Urgency};
pub use state::{Pid, Priority, ProcessRecord, ProcessState, SimCtx, Slot, Ticks};

/// Ticks a ready process may wait before its priority value drops by one.
pub const DEFAULT_MAX_WAIT_TIME: Ticks = 30;
