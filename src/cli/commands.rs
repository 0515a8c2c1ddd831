//! CLI command implementations

use super::output::{OutputEvent, OutputHandler};
use crate::completion::HttpCompletionClient;
use crate::config::{self, WikigenConfig};
use crate::workflow::{STEPS, WorkflowRunner};
use std::path::{Path, PathBuf};

/// Generate the wiki for a codebase
///
/// Returns the process exit code: 0 on full completion, 1 on any
/// configuration or step failure.
pub async fn generate_wiki(
    codebase_path: &Path,
    wiki_dir: &Path,
    config: &WikigenConfig,
    handler: &dyn OutputHandler,
) -> i32 {
    let codebase = expand_path(codebase_path);
    let wiki = expand_path(wiki_dir);

    // Credential is resolved before anything else so a missing key fails
    // without a single completion call.
    let api_key = match config::api_key() {
        Ok(key) => key,
        Err(e) => {
            handler.emit(OutputEvent::WorkflowError {
                error: e.to_string(),
            });
            return 1;
        }
    };

    let client = HttpCompletionClient::new(&config.completion, api_key);

    let runner = match WorkflowRunner::new(&codebase, &wiki, client) {
        Ok(runner) => runner,
        Err(e) => {
            handler.emit(OutputEvent::WorkflowError {
                error: e.to_string(),
            });
            return 1;
        }
    };

    handler.emit(OutputEvent::WorkflowStart {
        name: "wiki".into(),
        steps: STEPS.len(),
    });

    match runner.run(handler).await {
        Ok(report) => {
            handler.emit(OutputEvent::WorkflowComplete {
                success: true,
                duration_ms: report.duration.as_millis() as u64,
                steps_completed: report.outcomes.len(),
            });
            handler.emit(OutputEvent::Info {
                message: format!("Wiki written to {}", wiki.display()),
            });
            0
        }
        Err(e) => {
            handler.emit(OutputEvent::WorkflowError {
                error: e.to_string(),
            });
            1
        }
    }
}

/// List the registered steps and their output files
pub fn list_steps(handler: &dyn OutputHandler) {
    for (index, step) in STEPS.iter().enumerate() {
        handler.emit(OutputEvent::Info {
            message: format!("{}. {} -> {}", index + 1, step.name, step.output_file),
        });
    }
}

/// Report resolved configuration without issuing any completion call
pub fn doctor(config: &WikigenConfig, handler: &dyn OutputHandler) -> i32 {
    handler.emit(OutputEvent::Info {
        message: format!("endpoint:    {}", config.completion.base_url),
    });
    handler.emit(OutputEvent::Info {
        message: format!("model:       {}", config.completion.model),
    });
    handler.emit(OutputEvent::Info {
        message: format!("temperature: {}", config.completion.temperature),
    });

    match config::api_key() {
        Ok(_) => {
            handler.emit(OutputEvent::Info {
                message: format!("credential:  ✓ {} is set", config::API_KEY_VAR),
            });
            0
        }
        Err(e) => {
            handler.emit(OutputEvent::Info {
                message: format!("credential:  ✗ {}", e),
            });
            1
        }
    }
}

/// Expand `~` in user-supplied paths
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}
