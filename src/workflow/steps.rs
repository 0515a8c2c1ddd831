//! The registered documentation steps
//!
//! The step set is a declarative list of value records executed by the
//! runner's generic loop. Order matters: steps run top to bottom, and each
//! writes its own fixed-named file into the wiki directory.

use crate::listing::SourceListing;

/// One unit of the workflow: a name, a prompt, an output artifact.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    /// Step name, used in progress output and step-scoped errors
    pub name: &'static str,

    /// File written into the wiki directory, overwriting any prior run
    pub output_file: &'static str,

    /// Builds the prompt for this step from the source listing
    pub prompt: fn(&SourceListing) -> String,
}

/// The workflow, in execution order.
pub const STEPS: &[Step] = &[
    Step {
        name: "structure-overview",
        output_file: "structure.md",
        prompt: structure_prompt,
    },
    Step {
        name: "test-stub-generation",
        output_file: "tests.md",
        prompt: tests_prompt,
    },
    Step {
        name: "docstring-generation",
        output_file: "docstrings.md",
        prompt: docstrings_prompt,
    },
    Step {
        name: "wiki-generation",
        output_file: "overview.md",
        prompt: wiki_prompt,
    },
    Step {
        name: "get-started-guide-generation",
        output_file: "get_started.md",
        prompt: get_started_prompt,
    },
];

fn structure_prompt(listing: &SourceListing) -> String {
    format!(
        "Analyze the following codebase structure and provide a brief overview:\n{}",
        listing.files().join("\n")
    )
}

fn tests_prompt(_listing: &SourceListing) -> String {
    "Generate test stubs for the key functions in the codebase.".into()
}

fn docstrings_prompt(_listing: &SourceListing) -> String {
    "Write helpful docstrings for each function and class in the codebase.".into()
}

fn wiki_prompt(_listing: &SourceListing) -> String {
    "Based on previous analysis and tests, write a technical documentation wiki in markdown."
        .into()
}

fn get_started_prompt(_listing: &SourceListing) -> String {
    "Write a Get Started guide for developers using this documented codebase.".into()
}
