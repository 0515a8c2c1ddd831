//! Source tree listing
//!
//! Collects the relative paths of source files under a codebase root. The
//! listing feeds the structure-overview prompt; file contents are never read.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extensions treated as source code when building the listing.
const SOURCE_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cs", "ex", "go", "h", "hpp", "java", "js", "jsx", "kt", "php", "py", "rb",
    "rs", "scala", "swift", "ts", "tsx",
];

/// Directories that never contain project source.
const SKIP_DIRS: &[&str] = &[
    "target",
    "node_modules",
    "vendor",
    "dist",
    "build",
    "__pycache__",
];

/// Relative paths of source files under a codebase root, sorted.
#[derive(Debug, Clone)]
pub struct SourceListing {
    root: PathBuf,
    files: Vec<String>,
}

impl SourceListing {
    /// Walk `root` and collect every file with a source extension.
    ///
    /// Hidden directories and common vendor/build directories are skipped.
    /// Paths are relative to `root` and sorted so prompts are reproducible.
    pub fn scan(root: &Path) -> Result<Self, walkdir::Error> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| !is_skipped(e));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if !has_source_extension(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .display()
                .to_string();
            files.push(relative);
        }

        files.sort();

        Ok(Self {
            root: root.to_path_buf(),
            files,
        })
    }

    /// The codebase root this listing was built from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative source file paths, sorted.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Skip hidden entries and known vendor/build directories.
///
/// The root itself is never skipped, even when the codebase lives in a
/// hidden directory like `~/.dotfiles`.
fn is_skipped(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();

    if name.starts_with('.') {
        return true;
    }

    entry.file_type().is_dir() && SKIP_DIRS.contains(&name.as_ref())
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
