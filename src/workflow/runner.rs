//! Workflow runner - sequential step execution

use super::report::{RunReport, StepOutcome};
use super::steps::STEPS;
use crate::cli::output::{OutputEvent, OutputHandler};
use crate::completion::{Completion, CompletionError};
use crate::listing::SourceListing;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Errors during workflow execution
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("step '{step}' failed: {source}")]
    Step {
        step: String,
        #[source]
        source: CompletionError,
    },

    #[error("step '{step}' failed writing {path}: {source}")]
    Write {
        step: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WorkflowError {
    fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Workflow runner
///
/// Executes the registered steps strictly in order against one codebase,
/// writing one artifact per step into the wiki directory. The completion
/// client is injected so tests can script it.
#[derive(Debug)]
pub struct WorkflowRunner<C> {
    listing: SourceListing,
    wiki_dir: PathBuf,
    client: C,
}

impl<C: Completion> WorkflowRunner<C> {
    /// Create a runner for one codebase/wiki directory pair
    ///
    /// The codebase directory must exist; the wiki directory is created if
    /// absent. Either failing is a configuration error, raised here before
    /// any completion call is issued.
    pub fn new(codebase_dir: &Path, wiki_dir: &Path, client: C) -> Result<Self, WorkflowError> {
        if !codebase_dir.is_dir() {
            return Err(WorkflowError::configuration(format!(
                "source directory {} does not exist or is not a directory",
                codebase_dir.display()
            )));
        }

        let listing = SourceListing::scan(codebase_dir).map_err(|e| {
            WorkflowError::configuration(format!(
                "reading source directory {}: {}",
                codebase_dir.display(),
                e
            ))
        })?;

        std::fs::create_dir_all(wiki_dir).map_err(|e| {
            WorkflowError::configuration(format!(
                "creating wiki directory {}: {}",
                wiki_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            listing,
            wiki_dir: wiki_dir.to_path_buf(),
            client,
        })
    }

    /// Run every step in declared order
    ///
    /// Each step builds its prompt, performs one completion call, and writes
    /// the response verbatim to its fixed-named file, overwriting any prior
    /// run's output. The first failure halts the run; files written by
    /// earlier steps stay on disk.
    pub async fn run(&self, handler: &dyn OutputHandler) -> Result<RunReport, WorkflowError> {
        let started = Instant::now();
        let total = STEPS.len();
        let mut outcomes = Vec::with_capacity(total);

        tracing::info!(
            codebase = %self.listing.root().display(),
            source_files = self.listing.len(),
            "starting wiki workflow"
        );

        for (index, step) in STEPS.iter().enumerate() {
            handler.emit(OutputEvent::StepStart {
                name: step.name.into(),
                index: index + 1,
                total,
            });

            let step_started = Instant::now();
            let prompt = (step.prompt)(&self.listing);
            tracing::debug!(step = step.name, prompt_bytes = prompt.len(), "prompt built");

            let text = match self.client.complete(&prompt).await {
                Ok(text) => text,
                Err(e) => {
                    handler.emit(OutputEvent::StepError {
                        name: step.name.into(),
                        error: e.to_string(),
                    });
                    return Err(WorkflowError::Step {
                        step: step.name.into(),
                        source: e,
                    });
                }
            };

            let path = self.wiki_dir.join(step.output_file);
            if let Err(e) = std::fs::write(&path, &text) {
                handler.emit(OutputEvent::StepError {
                    name: step.name.into(),
                    error: e.to_string(),
                });
                return Err(WorkflowError::Write {
                    step: step.name.into(),
                    path,
                    source: e,
                });
            }

            let duration_ms = step_started.elapsed().as_millis() as u64;
            tracing::info!(
                step = step.name,
                file = %path.display(),
                response_bytes = text.len(),
                duration_ms,
                "step complete"
            );
            handler.emit(OutputEvent::StepComplete {
                name: step.name.into(),
                duration_ms,
                success: true,
            });

            outcomes.push(StepOutcome {
                step: step.name.into(),
                output_file: path,
                duration_ms,
            });
        }

        Ok(RunReport {
            outcomes,
            duration: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::QuietHandler;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Completion client scripted for tests: records every prompt in call
    /// order, optionally failing on the nth call.
    #[derive(Debug)]
    struct ScriptedCompletion {
        calls: Arc<Mutex<Vec<String>>>,
        fail_at: Option<usize>,
    }

    impl ScriptedCompletion {
        fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail_at: None,
            }
        }

        fn failing_at(call: usize) -> Self {
            Self {
                fail_at: Some(call),
                ..Self::new()
            }
        }

        fn calls(&self) -> Arc<Mutex<Vec<String>>> {
            self.calls.clone()
        }
    }

    #[async_trait]
    impl Completion for ScriptedCompletion {
        async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(prompt.to_string());

            if self.fail_at == Some(index) {
                return Err(CompletionError::transport("connection reset"));
            }

            Ok(format!("generated documentation {}", index))
        }
    }

    fn codebase() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_run_writes_all_artifacts() {
        let source = codebase();
        let wiki = TempDir::new().unwrap();
        let runner =
            WorkflowRunner::new(source.path(), wiki.path(), ScriptedCompletion::new()).unwrap();

        let report = runner.run(&QuietHandler).await.unwrap();

        assert_eq!(report.outcomes.len(), 5);
        for name in [
            "structure.md",
            "tests.md",
            "docstrings.md",
            "overview.md",
            "get_started.md",
        ] {
            let content = std::fs::read_to_string(wiki.path().join(name)).unwrap();
            assert!(!content.is_empty(), "{} is empty", name);
        }
    }

    #[tokio::test]
    async fn test_steps_execute_in_declared_order() {
        let source = codebase();
        let wiki = TempDir::new().unwrap();
        let client = ScriptedCompletion::new();
        let calls = client.calls();
        let runner = WorkflowRunner::new(source.path(), wiki.path(), client).unwrap();

        let report = runner.run(&QuietHandler).await.unwrap();

        // Calls were recorded in issue order; the first is the structure
        // prompt carrying the file listing, the rest are the fixed prompts.
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 5);
        assert!(calls[0].contains("main.rs"));
        assert!(calls[1].contains("test stubs"));
        assert!(calls[2].contains("docstrings"));
        assert!(calls[3].contains("documentation wiki"));
        assert!(calls[4].contains("Get Started"));

        let steps: Vec<_> = report.outcomes.iter().map(|o| o.step.as_str()).collect();
        let expected: Vec<_> = STEPS.iter().map(|s| s.name).collect();
        assert_eq!(steps, expected);
    }

    #[tokio::test]
    async fn test_halts_on_first_failure() {
        let source = codebase();
        let wiki = TempDir::new().unwrap();
        let client = ScriptedCompletion::failing_at(2);
        let calls = client.calls();
        let runner = WorkflowRunner::new(source.path(), wiki.path(), client).unwrap();

        let err = runner.run(&QuietHandler).await.unwrap_err();

        match err {
            WorkflowError::Step { step, source } => {
                assert_eq!(step, "docstring-generation");
                assert!(matches!(source, CompletionError::Transport { .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // Earlier steps' files exist, the failing step and later ones don't.
        assert!(wiki.path().join("structure.md").exists());
        assert!(wiki.path().join("tests.md").exists());
        assert!(!wiki.path().join("docstrings.md").exists());
        assert!(!wiki.path().join("overview.md").exists());
        assert!(!wiki.path().join("get_started.md").exists());

        // No call was issued past the failing step.
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_source_dir_is_configuration_error() {
        let wiki = TempDir::new().unwrap();
        let client = ScriptedCompletion::new();
        let calls = client.calls();

        let err = WorkflowRunner::new(Path::new("/nonexistent/codebase"), wiki.path(), client)
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Configuration { .. }));
        assert_eq!(calls.lock().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_source_path_must_be_a_directory() {
        let source = codebase();
        let wiki = TempDir::new().unwrap();
        let file = source.path().join("main.rs");

        let err =
            WorkflowRunner::new(&file, wiki.path(), ScriptedCompletion::new()).unwrap_err();

        assert!(matches!(err, WorkflowError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_wiki_dir_created_if_absent() {
        let source = codebase();
        let out = TempDir::new().unwrap();
        let wiki = out.path().join("nested/wiki");

        let runner =
            WorkflowRunner::new(source.path(), &wiki, ScriptedCompletion::new()).unwrap();
        runner.run(&QuietHandler).await.unwrap();

        assert!(wiki.join("structure.md").exists());
    }

    #[tokio::test]
    async fn test_rerun_overwrites_prior_output() {
        let source = codebase();
        let wiki = TempDir::new().unwrap();
        std::fs::write(wiki.path().join("structure.md"), "stale content").unwrap();

        let runner =
            WorkflowRunner::new(source.path(), wiki.path(), ScriptedCompletion::new()).unwrap();
        runner.run(&QuietHandler).await.unwrap();

        let content = std::fs::read_to_string(wiki.path().join("structure.md")).unwrap();
        assert!(!content.contains("stale content"));
    }

    #[tokio::test]
    async fn test_unrelated_wiki_files_left_alone() {
        let source = codebase();
        let wiki = TempDir::new().unwrap();
        std::fs::write(wiki.path().join("notes.txt"), "hands off").unwrap();

        let runner =
            WorkflowRunner::new(source.path(), wiki.path(), ScriptedCompletion::new()).unwrap();
        runner.run(&QuietHandler).await.unwrap();

        let content = std::fs::read_to_string(wiki.path().join("notes.txt")).unwrap();
        assert_eq!(content, "hands off");
    }
}
