//! Output handlers for CLI commands
//!
//! Progress goes to stderr so generated-file summaries on stdout stay
//! pipeable.

use std::io::{self, Write};

/// Events emitted during workflow execution
#[derive(Debug, Clone)]
pub enum OutputEvent {
    WorkflowStart {
        name: String,
        steps: usize,
    },
    StepStart {
        name: String,
        index: usize,
        total: usize,
    },
    StepComplete {
        name: String,
        duration_ms: u64,
        success: bool,
    },
    StepError {
        name: String,
        error: String,
    },
    WorkflowComplete {
        success: bool,
        duration_ms: u64,
        steps_completed: usize,
    },
    WorkflowError {
        error: String,
    },
    Info {
        message: String,
    },
}

/// Output handler trait
pub trait OutputHandler: Send + Sync {
    /// Emit an event
    fn emit(&self, event: OutputEvent);
}

/// Console output handler
pub struct ConsoleHandler;

impl ConsoleHandler {
    fn format_duration(ms: u64) -> String {
        if ms < 1000 {
            format!("{}ms", ms)
        } else {
            format!("{:.1}s", ms as f64 / 1000.0)
        }
    }
}

impl OutputHandler for ConsoleHandler {
    fn emit(&self, event: OutputEvent) {
        match event {
            OutputEvent::WorkflowStart { name, steps } => {
                eprintln!("Running workflow '{}' ({} steps)", name, steps);
            }
            OutputEvent::StepStart { name, index, total } => {
                eprint!("[{}/{}] {}... ", index, total, name);
                let _ = io::stderr().flush();
            }
            OutputEvent::StepComplete {
                duration_ms,
                success,
                ..
            } => {
                if success {
                    eprintln!("✓ ({})", Self::format_duration(duration_ms));
                } else {
                    eprintln!("✗ ({})", Self::format_duration(duration_ms));
                }
            }
            OutputEvent::StepError { name, error } => {
                eprintln!("✗");
                eprintln!("Error in step '{}': {}", name, error);
            }
            OutputEvent::WorkflowComplete {
                success,
                duration_ms,
                steps_completed,
            } => {
                eprintln!();
                if success {
                    eprintln!(
                        "✓ Wiki generated ({} steps in {})",
                        steps_completed,
                        Self::format_duration(duration_ms)
                    );
                } else {
                    eprintln!(
                        "✗ Wiki generation failed after {} steps ({})",
                        steps_completed,
                        Self::format_duration(duration_ms)
                    );
                }
            }
            OutputEvent::WorkflowError { error } => {
                eprintln!("Error: {}", error);
            }
            OutputEvent::Info { message } => {
                eprintln!("{}", message);
            }
        }
    }
}

/// Quiet handler that emits nothing
pub struct QuietHandler;

impl OutputHandler for QuietHandler {
    fn emit(&self, _event: OutputEvent) {}
}

/// Create an output handler based on the quiet flag
pub fn create_handler(quiet: bool) -> Box<dyn OutputHandler> {
    if quiet {
        Box::new(QuietHandler)
    } else {
        Box::new(ConsoleHandler)
    }
}
