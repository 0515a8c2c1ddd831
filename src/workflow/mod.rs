//! Workflow execution engine for wikigen
//!
//! This module handles:
//! - The fixed, ordered step list (one markdown artifact per step)
//! - Sequential step execution with halt-on-first-failure
//! - Per-run reporting
//!
//! # Example
//!
//! ```ignore
//! use wikigen::workflow::WorkflowRunner;
//!
//! let runner = WorkflowRunner::new(codebase_dir, wiki_dir, client)?;
//! let report = runner.run(&*handler).await?;
//!
//! for outcome in &report.outcomes {
//!     println!("{} -> {}", outcome.step, outcome.output_file.display());
//! }
//! ```

mod report;
mod runner;
mod steps;

#[allow(unused_imports)]
pub use report::{RunReport, StepOutcome};
pub use runner::{WorkflowError, WorkflowRunner};
#[allow(unused_imports)]
pub use steps::{STEPS, Step};
