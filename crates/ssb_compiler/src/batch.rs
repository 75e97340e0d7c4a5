//! Directory batch compilation.
//!
//! Compiles every template directly inside one directory, writing each
//! container next to its template. Failures are handled per their
//! [`ErrorClass`](crate::ErrorClass):
//!
//! - a template that cannot be read (or is empty), or a container file that
//!   cannot be created, halts the batch; no further files are attempted
//! - a template that fails to scan or encode is reported and the batch
//!   moves on to the next file

use crate::compile::compile_with;
use crate::config::CompilerConfig;
use crate::error::{CompileError, CompileResult};
use ssb_storage::{FileSink, TemplateSource};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of one template in a batch.
#[derive(Debug)]
pub enum FileOutcome {
    /// The container was written.
    Compiled {
        /// Template path.
        input: PathBuf,
        /// Container path.
        output: PathBuf,
        /// Number of segments written.
        segments: u32,
    },
    /// Scanning or encoding failed; the batch continued.
    Failed {
        /// Template path.
        input: PathBuf,
        /// Container path (may hold a partial container).
        output: PathBuf,
        /// What went wrong.
        error: CompileError,
    },
}

impl FileOutcome {
    /// Template path.
    #[must_use]
    pub fn input(&self) -> &Path {
        match self {
            Self::Compiled { input, .. } | Self::Failed { input, .. } => input,
        }
    }

    /// Container path.
    #[must_use]
    pub fn output(&self) -> &Path {
        match self {
            Self::Compiled { output, .. } | Self::Failed { output, .. } => output,
        }
    }

    /// Returns `true` if the container was written.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        matches!(self, Self::Compiled { .. })
    }
}

/// Why a batch stopped early.
#[derive(Debug)]
pub struct BatchHalt {
    /// The template being processed when the batch stopped.
    pub input: PathBuf,
    /// The acquisition failure.
    pub error: CompileError,
}

/// Summary of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per template attempted, in processing order.
    pub outcomes: Vec<FileOutcome>,
    /// Set if the batch stopped before the last template.
    pub halted: Option<BatchHalt>,
}

impl BatchReport {
    /// Number of containers written.
    #[must_use]
    pub fn compiled(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_compiled()).count()
    }

    /// Number of templates that failed without halting the batch.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.compiled()
    }

    /// Returns `true` if the batch stopped early.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Total segments across all written containers.
    #[must_use]
    pub fn total_segments(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| match o {
                FileOutcome::Compiled { segments, .. } => u64::from(*segments),
                FileOutcome::Failed { .. } => 0,
            })
            .sum()
    }
}

/// Compiles all templates in a directory.
#[derive(Debug, Clone, Default)]
pub struct BatchCompiler {
    config: CompilerConfig,
}

impl BatchCompiler {
    /// Creates a batch compiler.
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Returns `true` if `file_name` should be compiled.
    ///
    /// The name must end with the input extension and have at least one
    /// character before it.
    #[must_use]
    pub fn is_eligible(&self, file_name: &str) -> bool {
        let ext = &self.config.input_extension;
        file_name.len() > ext.len() && file_name.ends_with(ext.as_str())
    }

    /// Derives the container file name by replacing everything from the
    /// last `.` with the output extension.
    #[must_use]
    pub fn output_name(&self, file_name: &str) -> Option<String> {
        let stem = &file_name[..file_name.rfind('.')?];
        Some(format!("{stem}{}", self.config.output_extension))
    }

    /// Lists the templates directly inside `dir`, sorted by file name.
    ///
    /// Entries are matched by name before anything else is looked up, so
    /// unrelated entries (including broken links) never affect the batch.
    /// An eligible link is kept unless it points at a directory; a dangling
    /// one is left for [`BatchCompiler::run`] to report when it fails to open.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Walk`] if the directory cannot be listed.
    pub fn candidates(&self, dir: &Path) -> CompileResult<Vec<PathBuf>> {
        let mut found = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| CompileError::Walk {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;

            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!(
                    path = %entry.path().display(),
                    "skipping file with non UTF-8 name"
                );
                continue;
            };
            if !self.is_eligible(name) {
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if file_type.is_symlink() && entry.path().is_dir() {
                continue;
            }
            found.push(entry.into_path());
        }

        Ok(found)
    }

    /// Compiles every template in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the configuration is invalid or the
    /// directory cannot be listed. Per-file failures, including the one
    /// that halts the batch, are recorded in the report.
    pub fn run(&self, dir: &Path) -> CompileResult<BatchReport> {
        self.config.validate()?;

        let span = tracing::info_span!(
            "batch",
            dir = %dir.display(),
            format = %self.config.format
        );
        let _enter = span.enter();

        let candidates = self.candidates(dir)?;
        tracing::debug!(count = candidates.len(), "found templates");

        let mut report = BatchReport::default();
        for input in candidates {
            match self.compile_one(&input) {
                Step::Done(outcome) => report.outcomes.push(outcome),
                Step::Halt(error) => {
                    tracing::error!(
                        input = %input.display(),
                        error = %error,
                        "cannot acquire template or container; stopping batch"
                    );
                    report.halted = Some(BatchHalt { input, error });
                    break;
                }
            }
        }

        tracing::debug!(
            compiled = report.compiled(),
            failed = report.failed(),
            halted = report.is_halted(),
            "batch finished"
        );
        Ok(report)
    }

    fn compile_one(&self, input: &Path) -> Step {
        let source = match TemplateSource::open(input) {
            Ok(source) => source,
            Err(e) => return Step::Halt(CompileError::acquire(input, e)),
        };

        let Some(output) = self.output_path(input) else {
            return Step::Halt(CompileError::Acquire {
                path: input.to_path_buf(),
                source: ssb_storage::StorageError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "cannot derive container file name",
                )),
            });
        };

        let mut sink = match FileSink::create(&output) {
            Ok(sink) => sink,
            Err(e) => return Step::Halt(CompileError::acquire(&output, e)),
        };

        match compile_with(source.as_bytes(), &mut sink, &self.config) {
            Ok(segments) => {
                tracing::info!(
                    output = %output.display(),
                    segments,
                    "template processing done"
                );
                Step::Done(FileOutcome::Compiled {
                    input: input.to_path_buf(),
                    output,
                    segments,
                })
            }
            Err(error) if error.is_batch_fatal() => Step::Halt(error),
            Err(error) => {
                tracing::error!(
                    input = %input.display(),
                    error = %error,
                    "error occurred while processing template"
                );
                Step::Done(FileOutcome::Failed {
                    input: input.to_path_buf(),
                    output,
                    error,
                })
            }
        }
    }

    fn output_path(&self, input: &Path) -> Option<PathBuf> {
        let name = input.file_name()?.to_str()?;
        Some(input.with_file_name(self.output_name(name)?))
    }
}

enum Step {
    Done(FileOutcome),
    Halt(CompileError),
}
