use thiserror::Error;

use super::state::Pid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    /// Selection was attempted with nothing ready
    #[error("ready store is empty")]
    EmptyStore,

    #[error("process {0} is not in the ready store")]
    NotFound(Pid),

    #[error("process {0} is already in the ready store")]
    AlreadyReady(Pid),

    #[error("no processes to schedule")]
    NoProcesses,

    #[error("process id {0} appears more than once")]
    DuplicateId(Pid),

    #[error("process {0} has a duration of zero")]
    ZeroDuration(Pid),

    #[error("maximum wait time must be at least one tick")]
    ZeroMaxWait,
}

impl SchedError {
    /// Errors that can only come from a broken engine, never from input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::EmptyStore | Self::NotFound(_) | Self::AlreadyReady(_)
        )
    }
}
