use rand::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use super::job::ProcessSpec;
use crate::core::{Pid, Priority, Ticks};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkloadError {
    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("min_priority ({min}) exceeds max_priority ({max})")]
    PriorityRange { min: Priority, max: Priority },

    #[error("process durations must be at least 1 tick")]
    ZeroDuration,
}

/// Parameters for a reproducible random process list: on each tick a
/// process arrives with probability `p_arrival`, and is short with
/// probability `p_short`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bernoulli {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_ticks: Ticks,
    pub long_ticks: Ticks,
    pub min_priority: Priority,
    pub max_priority: Priority,
    pub seed: u64,
}

impl Bernoulli {
    pub fn validate(&self) -> Result<(), WorkloadError> {
        for (name, value) in [("p_arrival", self.p_arrival), ("p_short", self.p_short)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WorkloadError::Probability { name, value });
            }
        }
        if self.min_priority > self.max_priority {
            return Err(WorkloadError::PriorityRange {
                min: self.min_priority,
                max: self.max_priority,
            });
        }
        if self.short_ticks == 0 || self.long_ticks == 0 {
            return Err(WorkloadError::ZeroDuration);
        }
        Ok(())
    }
}

pub fn bernoulli_processes(params: &Bernoulli) -> Result<Vec<ProcessSpec>, WorkloadError> {
    params.validate()?;

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut processes = Vec::new();

    for t in 0..params.ticks {
        if rng.random::<f64>() < params.p_arrival {
            let duration = if rng.random::<f64>() < params.p_short {
                params.short_ticks
            } else {
                params.long_ticks
            };
            let priority = rng.random_range(params.min_priority..=params.max_priority);

            processes.push(ProcessSpec {
                pid: processes.len() as Pid + 1,
                priority,
                duration,
                arrival_time: t,
            });
        }
    }

    Ok(processes)
}
