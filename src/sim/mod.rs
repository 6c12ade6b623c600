pub mod driver;
pub mod job;
pub mod workload;

pub use driver::{Sim, SimConfig, SimReport, Summary};
pub use job::{ProcessOutcome, ProcessSpec};
pub use workload::{Bernoulli, WorkloadError, bernoulli_processes};
