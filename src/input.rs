use std::{fs, io, path::Path, str::FromStr};

use thiserror::Error;
use tracing::warn;

use crate::core::Pid;
use crate::sim::ProcessSpec;

const FIELDS: [&str; 4] = ["id", "priority", "duration", "arrival time"];

#[derive(Error, Debug)]
pub enum InputError {
    #[error("line {line}: invalid {field} `{token}`")]
    Malformed {
        line: usize,
        token: String,
        field: &'static str,
    },

    #[error("line {line}: incomplete process record ({found} of 4 fields)")]
    Truncated { line: usize, found: usize },

    #[error("failed to read process list: {0}")]
    Io(#[from] io::Error),
}

pub fn read_processes(path: &Path) -> Result<Vec<ProcessSpec>, InputError> {
    let text = fs::read_to_string(path)?;
    parse_processes(&text)
}

/// Parses whitespace-separated `id priority duration arrival` quadruples.
/// Records may share or span lines. Nothing is returned unless every
/// record parses.
///
/// Ids and priorities may be negative. A negative arrival is clamped to
/// time 0, where the clock starts. A negative duration is malformed.
pub fn parse_processes(text: &str) -> Result<Vec<ProcessSpec>, InputError> {
    let tokens = text
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |token| (i + 1, token)));

    let mut processes = Vec::new();
    let mut fields: Vec<(usize, &str)> = Vec::with_capacity(FIELDS.len());
    for token in tokens {
        fields.push(token);
        if fields.len() == FIELDS.len() {
            let pid: Pid = field(&fields, 0)?;
            let priority = field(&fields, 1)?;
            let duration = field(&fields, 2)?;
            let arrival: i64 = field(&fields, 3)?;
            if arrival < 0 {
                warn!(pid, arrival, "negative arrival time, admitting at time 0");
            }
            processes.push(ProcessSpec {
                pid,
                priority,
                duration,
                arrival_time: arrival.max(0) as u64,
            });
            fields.clear();
        }
    }

    if let Some(&(line, _)) = fields.first() {
        return Err(InputError::Truncated {
            line,
            found: fields.len(),
        });
    }
    Ok(processes)
}

fn field<T: FromStr>(fields: &[(usize, &str)], index: usize) -> Result<T, InputError> {
    let (line, token) = fields[index];
    token.parse().map_err(|_| InputError::Malformed {
        line,
        token: token.to_owned(),
        field: FIELDS[index],
    })
}
