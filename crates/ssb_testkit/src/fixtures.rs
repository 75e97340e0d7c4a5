//! Test fixtures for template directories.
//!
//! Provides a temporary directory that templates can be dropped into and
//! compiled containers read back from.

use ssb_compiler::{BatchCompiler, BatchReport, CompilerConfig, FormatVersion};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary template directory with automatic cleanup.
pub struct TemplateDir {
    dir: TempDir,
}

impl TemplateDir {
    /// Creates an empty template directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a directory holding the given `(name, content)` templates.
    pub fn with_templates<'a>(templates: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let dir = Self::new();
        for (name, content) in templates {
            dir.write(name, content);
        }
        dir
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the directory.
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes a file into the directory.
    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, content).expect("Failed to write template");
        path
    }

    /// Reads a file from the directory.
    pub fn read(&self, name: &str) -> Vec<u8> {
        fs::read(self.join(name)).expect("Failed to read file")
    }

    /// Returns `true` if `name` exists in the directory.
    pub fn exists(&self, name: &str) -> bool {
        self.join(name).exists()
    }

    /// Compiles the directory with `config`.
    pub fn compile_with(&self, config: CompilerConfig) -> BatchReport {
        BatchCompiler::new(config)
            .run(self.path())
            .expect("Failed to list template directory")
    }

    /// Compiles the directory into `format` with default settings.
    pub fn compile(&self, format: FormatVersion) -> BatchReport {
        self.compile_with(CompilerConfig::new().format(format))
    }
}

impl Default for TemplateDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a test with a temporary template directory.
///
/// # Example
///
/// ```rust
/// use ssb_testkit::with_template_dir;
///
/// with_template_dir(|dir| {
///     dir.write("a.html", "hello");
///     assert!(dir.exists("a.html"));
/// });
/// ```
pub fn with_template_dir<F, R>(f: F) -> R
where
    F: FnOnce(&TemplateDir) -> R,
{
    let dir = TemplateDir::new();
    f(&dir)
}
