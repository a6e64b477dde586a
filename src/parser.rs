//! Parser for the JSPLib / OR-Library job-shop text format.
//!
//! ```text
//! # comment lines start with '#'
//! 2 2                 <- n_jobs n_machines
//! 0 3 1 2             <- job 0: (machine, time) pairs in processing order
//! 1 4 0 1             <- job 1
//! ```
//!
//! Machine ids are 0-based. Blank lines are ignored.

use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::models::{JobShopProblem, Operation};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing `n_jobs n_machines` header")]
    MissingHeader,
    #[error("line {line}: `{token}` is not a valid number")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: expected (machine, time) pairs, found an odd number of values")]
    OddPairs { line: usize },
    #[error("expected {expected} job lines, found {found}")]
    MissingJobs { expected: usize, found: usize },
    #[error("line {line}: machine {machine} is out of range for {n_machines} machines")]
    MachineOutOfRange {
        line: usize,
        machine: usize,
        n_machines: usize,
    },
}

/// Parses a job-shop instance from its text representation.
pub fn parse_jsp(content: &str) -> Result<JobShopProblem, ParseError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    let (header_line, header) = lines.next().ok_or(ParseError::MissingHeader)?;
    let header = parse_numbers(header_line, header)?;
    let (n_jobs, n_machines) = match header.as_slice() {
        [n_jobs, n_machines, ..] => (*n_jobs, *n_machines),
        _ => return Err(ParseError::MissingHeader),
    };

    let mut jobs = Vec::new();
    for (line, text) in lines.take(n_jobs) {
        let values = parse_numbers(line, text)?;
        if values.len() % 2 != 0 {
            return Err(ParseError::OddPairs { line });
        }
        let job = values
            .chunks_exact(2)
            .map(|pair| {
                let (machine, time) = (pair[0], pair[1]);
                if machine >= n_machines {
                    return Err(ParseError::MachineOutOfRange {
                        line,
                        machine,
                        n_machines,
                    });
                }
                let time = i64::try_from(time).map_err(|_| ParseError::InvalidNumber {
                    line,
                    token: time.to_string(),
                })?;
                Ok(Operation::new(machine, time))
            })
            .collect::<Result<Vec<_>, _>>()?;
        jobs.push(job);
    }

    if jobs.len() < n_jobs {
        return Err(ParseError::MissingJobs {
            expected: n_jobs,
            found: jobs.len(),
        });
    }

    debug!("parsed job-shop instance: {n_jobs} jobs, {n_machines} machines");
    Ok(JobShopProblem::with_machines(n_machines, jobs))
}

/// Reads and parses a job-shop instance file.
pub fn parse_jsp_file(path: impl AsRef<Path>) -> crate::Result<JobShopProblem> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_jsp(&content)?)
}

fn parse_numbers(line: usize, text: &str) -> Result<Vec<usize>, ParseError> {
    text.split_whitespace()
        .map(|token| {
            token.parse::<usize>().map_err(|_| ParseError::InvalidNumber {
                line,
                token: token.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) const FT06: &str = "\
#+++++++++++++++++++++++++++++
# instance ft06
#+++++++++++++++++++++++++++++
# Fisher and Thompson 6x6 instance, alternate name (mt06)
6 6
2 1 0 3 1 6 3 7 5 3 4 6
1 8 2 5 4 10 5 10 0 10 3 4
2 5 3 4 5 8 0 9 1 1 4 7
1 5 0 5 2 5 3 3 4 8 5 9
2 9 1 3 4 5 5 4 0 3 3 1
1 3 3 3 5 9 0 10 4 4 2 1
";
