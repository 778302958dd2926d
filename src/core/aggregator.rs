//! Result collection shared by all per-repository tasks

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outcome of one task: the formatted block and whether it counts as a failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskOutcome {
    pub text: String,
    pub failed: bool,
}

impl TaskOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failed: false,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failed: true,
        }
    }
}

#[derive(Debug, Default)]
struct AggregateState {
    results: Vec<String>,
    failed: bool,
}

/// Thread-safe collector of formatted results plus a sticky failure flag
///
/// Results and the flag live behind a single lock. The flag starts cleared
/// and, once set, is never reset.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    state: Mutex<AggregateState>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AggregateState> {
        // A panicking task cannot leave the vector half-written, so recover the guard
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends one task's result, folding its failure into the aggregate flag
    pub fn record(&self, outcome: TaskOutcome) {
        let mut state = self.lock();
        state.failed |= outcome.failed;
        state.results.push(outcome.text);
    }

    pub fn len(&self) -> usize {
        self.lock().results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted copy of everything recorded so far
    pub fn report(&self) -> Report {
        let state = self.lock();
        Report::new(state.results.clone(), state.failed)
    }
}

/// Final, deterministically ordered output of a run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    results: Vec<String>,
    failed: bool,
}

impl Report {
    /// Sorts `results` lexicographically by their full text
    pub fn new(mut results: Vec<String>, failed: bool) -> Self {
        results.sort();
        Self { results, failed }
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    /// 1 if any task failed, else 0
    pub fn exit_code(&self) -> u8 {
        u8::from(self.failed)
    }

    /// Prints each result on its own line
    pub fn print(&self) {
        for result in &self.results {
            println!("{result}");
        }
    }
}
