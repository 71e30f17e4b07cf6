//! Opt-in step trace.
//!
//! `Variable::traced()` turns recording on; each pipeline method then pushes
//! one [`Step`] with its name, elapsed time, and a snapshot of the payload
//! after the step. When tracing is off nothing is cloned or stored.
//!
//! The trace is meant for debugging chains (the CLI prints it with
//! `--trace`), not for hot paths: snapshots clone the whole payload.

use std::time::Duration;

use crate::{ShapeHint, Value};

/// One executed pipeline step.
#[derive(Debug, Clone)]
pub struct Step {
    /// Operation name, e.g. `"trim"` or `"to_float"`.
    pub operation: &'static str,
    /// Container shape when the step ran.
    pub shape: ShapeHint,
    /// Elapsed time for the step.
    pub duration: Duration,
    /// Payload after the step.
    pub snapshot: Value,
}

/// Ordered record of executed steps.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    pub steps: Vec<Step>,
}

impl Trace {
    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Total time across all recorded steps.
    pub fn total(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Operation names in execution order.
    pub fn operations(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.operation).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
