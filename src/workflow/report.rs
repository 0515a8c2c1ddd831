//! Per-run reporting
//!
//! Built incrementally while the runner executes; discarded once the CLI has
//! rendered its summary. Only the written files persist.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of one completed step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Step name
    pub step: String,

    /// Absolute path of the artifact this step wrote
    pub output_file: PathBuf,

    /// How long the step took, completion call included
    pub duration_ms: u64,
}

/// Result of a full workflow run
///
/// Exists only for successful runs; a failed run surfaces as a step-scoped
/// [`WorkflowError`](super::WorkflowError) instead.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// One outcome per executed step, in execution order
    pub outcomes: Vec<StepOutcome>,

    /// Total wall-clock time
    pub duration: Duration,
}

impl RunReport {
    /// Paths of the written artifacts, in step order
    pub fn files_written(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().map(|o| o.output_file.as_path())
    }
}
