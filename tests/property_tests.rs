//! Property tests over random process lists.

use aging_sched::core::SchedEvent;
use aging_sched::sim::{ProcessSpec, Sim, SimConfig, SimReport};
use proptest::prelude::*;
use std::collections::HashMap;

fn processes() -> impl Strategy<Value = Vec<ProcessSpec>> {
    prop::collection::vec((-5i64..10, 1u64..8, 0u64..20), 1..12).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (priority, duration, arrival))| {
                ProcessSpec::new(i as i64 + 1, priority, duration, arrival)
            })
            .collect()
    })
}

fn simulate(specs: &[ProcessSpec], max_wait_time: u64) -> (Vec<SchedEvent>, SimReport) {
    let sim = Sim::new(specs.to_vec(), SimConfig { max_wait_time }).unwrap();
    let mut events = Vec::new();
    let report = sim.run(&mut events).unwrap();
    (events, report)
}

proptest! {
    #[test]
    fn prop_every_tick_of_work_executes_once(specs in processes(), max_wait in 1u64..6) {
        let (events, report) = simulate(&specs, max_wait);

        for (spec, outcome) in specs.iter().zip(&report.outcomes) {
            prop_assert_eq!(outcome.executed, spec.duration);
            prop_assert!(outcome.completion_time.is_some());
        }

        let ticks: Vec<u64> = events
            .iter()
            .filter_map(|e| match *e {
                SchedEvent::Executed { at, .. } => Some(at),
                _ => None,
            })
            .collect();
        let total: u64 = specs.iter().map(|s| s.duration).sum();
        prop_assert_eq!(ticks.len() as u64, total);
        prop_assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_priority_only_improves_one_step_at_a_time(specs in processes(), max_wait in 1u64..6) {
        let (events, report) = simulate(&specs, max_wait);

        let mut current: HashMap<i64, i64> = specs.iter().map(|s| (s.pid, s.priority)).collect();
        for event in &events {
            if let SchedEvent::Aged { pid, priority, .. } = *event {
                let before = current[&pid];
                prop_assert_eq!(priority, before - 1);
                current.insert(pid, priority);
            }
        }

        for outcome in &report.outcomes {
            prop_assert_eq!(outcome.final_priority, outcome.initial_priority - outcome.boosts as i64);
            prop_assert_eq!(current[&outcome.pid], outcome.final_priority);
        }
    }

    #[test]
    fn prop_one_boost_per_max_wait_ticks(specs in processes(), max_wait in 1u64..6) {
        let (_, report) = simulate(&specs, max_wait);

        for outcome in &report.outcomes {
            prop_assert_eq!(outcome.boosts, outcome.waited / max_wait);
        }
    }

    #[test]
    fn prop_ready_time_is_split_between_running_and_waiting(specs in processes()) {
        let (_, report) = simulate(&specs, 30);

        for outcome in &report.outcomes {
            let turnaround = outcome.turnaround().unwrap();
            prop_assert_eq!(turnaround, outcome.duration + outcome.waited);
        }
        let waited: u64 = report.outcomes.iter().map(|o| o.waited).sum();
        prop_assert_eq!(report.summary.total_wait, waited);
        prop_assert_eq!(
            report.summary.average_wait,
            waited as f64 / specs.len() as f64
        );
    }

    #[test]
    fn prop_run_ends_within_work_plus_idle_bound(specs in processes(), max_wait in 1u64..6) {
        let (_, report) = simulate(&specs, max_wait);

        let work: u64 = specs.iter().map(|s| s.duration).sum();
        let last_arrival = specs.iter().map(|s| s.arrival_time).max().unwrap();
        let first_arrival = specs.iter().map(|s| s.arrival_time).min().unwrap();

        prop_assert!(report.summary.finished_at + 1 <= last_arrival + work);
        prop_assert!(report.summary.finished_at + 1 >= first_arrival + work);
    }

    #[test]
    fn prop_more_urgent_arrival_runs_next(specs in processes()) {
        let (events, _) = simulate(&specs, 30);

        // A preemption always hands the CPU to the process that caused it
        for (i, event) in events.iter().enumerate() {
            if let SchedEvent::Preempted { by, at, .. } = *event {
                let next = events[i + 1..].iter().find_map(|e| match *e {
                    SchedEvent::Running { pid, at, .. } => Some((pid, at)),
                    _ => None,
                });
                prop_assert_eq!(next, Some((by, at)));
            }
        }
    }
}
