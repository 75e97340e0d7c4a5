//! Compiler configuration.

use crate::error::{CompileError, CompileResult};
use crate::format::FormatVersion;
use crate::scanner::MAX_TAG_LENGTH;

/// Configuration for compiling templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Container format to write.
    pub format: FormatVersion,

    /// Extension (with leading dot) of templates picked up by a batch.
    pub input_extension: String,

    /// Extension (with leading dot) given to compiled containers.
    pub output_extension: String,

    /// Longest tag accepted. Never above the format limit.
    pub max_tag_length: usize,

    /// Whether to sync each container to disk once it is complete.
    pub sync_on_finish: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            format: FormatVersion::Inline,
            input_extension: ".html".to_string(),
            output_extension: ".ssb".to_string(),
            max_tag_length: MAX_TAG_LENGTH,
            sync_on_finish: false,
        }
    }
}

impl CompilerConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the container format.
    #[must_use]
    pub const fn format(mut self, format: FormatVersion) -> Self {
        self.format = format;
        self
    }

    /// Sets the template extension.
    #[must_use]
    pub fn input_extension(mut self, ext: impl Into<String>) -> Self {
        self.input_extension = ext.into();
        self
    }

    /// Sets the container extension.
    #[must_use]
    pub fn output_extension(mut self, ext: impl Into<String>) -> Self {
        self.output_extension = ext.into();
        self
    }

    /// Sets the tag length limit. Values above the format limit are clamped.
    #[must_use]
    pub const fn max_tag_length(mut self, len: usize) -> Self {
        self.max_tag_length = if len > MAX_TAG_LENGTH {
            MAX_TAG_LENGTH
        } else {
            len
        };
        self
    }

    /// Sets whether to sync each container once complete.
    #[must_use]
    pub const fn sync_on_finish(mut self, value: bool) -> Self {
        self.sync_on_finish = value;
        self
    }

    /// Checks that both extensions are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidConfig`] if an extension is missing its
    /// leading dot, has nothing after it, contains a path separator, or if
    /// both extensions are equal (outputs would overwrite their inputs).
    pub fn validate(&self) -> CompileResult<()> {
        for (name, ext) in [
            ("input extension", &self.input_extension),
            ("output extension", &self.output_extension),
        ] {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(CompileError::invalid_config(format!(
                    "{name} '{ext}' must be a dot followed by at least one character"
                )));
            }
            if ext.contains(['/', '\\']) {
                return Err(CompileError::invalid_config(format!(
                    "{name} '{ext}' must not contain a path separator"
                )));
            }
        }
        if self.input_extension == self.output_extension {
            return Err(CompileError::invalid_config(
                "input and output extensions must differ",
            ));
        }
        Ok(())
    }
}
