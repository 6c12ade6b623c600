pub mod config;
pub mod core;
pub mod input;
pub mod report;
pub mod sim;

pub use crate::core::{EventSink, SchedError, SchedEvent};
pub use crate::sim::{ProcessSpec, Sim, SimConfig};
