//! CLI module for wikigen
//!
//! This module provides:
//! - Command implementations (run, steps, doctor)
//! - Output handlers (console, quiet)

pub mod commands;
pub mod output;

pub use commands::{doctor, generate_wiki, list_steps};
#[allow(unused_imports)]
pub use output::{OutputEvent, OutputHandler};
pub use output::create_handler;
