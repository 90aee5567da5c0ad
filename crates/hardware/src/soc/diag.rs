//! Diagnostic sink.
//!
//! The sink is the leveled message channel shared by the harness and every backend.
//! By default messages become `tracing` events under the `plugsim` target, so the
//! host decides where they go by installing a subscriber. When redirected to a file,
//! the sink writes one plain-text line per message at or above its minimum level
//! ([`Level::Info`] unless changed with [`DiagnosticSink::with_min_level`]):
//!
//! ```text
//! INFO  DRAM: attached to the address space
//! ```

use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

use crate::common::SimError;

/// Severity of a diagnostic message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Detailed tracing output.
    Debug,
    /// Progress messages.
    Info,
    /// Recoverable anomalies.
    Warn,
    /// Faults and failures.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.pad(label)
    }
}

struct LogFile {
    path: PathBuf,
    min_level: Level,
    writer: RefCell<LineWriter<File>>,
}

/// Leveled diagnostic channel, optionally redirected to a file.
///
/// One sink exists per simulation. It is shared with backends through `Rc`, hence
/// the interior mutability around the file writer.
pub struct DiagnosticSink {
    file: Option<LogFile>,
}

impl DiagnosticSink {
    /// Creates a sink that forwards messages to `tracing`.
    pub const fn new() -> Self {
        Self { file: None }
    }

    /// Creates a sink that writes messages to `path`, truncating it.
    ///
    /// Debug messages are dropped; see [`Self::with_min_level`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be created.
    pub fn to_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| SimError::Io {
            what: "diagnostic log",
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            file: Some(LogFile {
                path,
                min_level: Level::Info,
                writer: RefCell::new(LineWriter::new(file)),
            }),
        })
    }

    /// Sets the lowest level written to the log file. Console mode is unaffected;
    /// there the subscriber's filter decides.
    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        if let Some(file) = &mut self.file {
            file.min_level = level;
        }
        self
    }

    /// Returns the log file path when the sink is redirected.
    pub fn log_path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path.as_path())
    }

    /// Emits one message.
    ///
    /// # Arguments
    ///
    /// * `level` - Severity.
    /// * `tag` - Source of the message, typically a backend name; may be empty.
    /// * `message` - Text of the message.
    pub fn log(&self, level: Level, tag: &str, message: &str) {
        let Some(file) = &self.file else {
            match level {
                Level::Debug => tracing::debug!(target: "plugsim", tag, "{message}"),
                Level::Info => tracing::info!(target: "plugsim", tag, "{message}"),
                Level::Warn => tracing::warn!(target: "plugsim", tag, "{message}"),
                Level::Error => tracing::error!(target: "plugsim", tag, "{message}"),
            }
            return;
        };
        if level < file.min_level {
            return;
        }

        let mut writer = file.writer.borrow_mut();
        let written = if tag.is_empty() {
            writeln!(writer, "{level:<5} {message}")
        } else {
            writeln!(writer, "{level:<5} {tag}: {message}")
        };
        if let Err(e) = written {
            tracing::warn!(
                target: "plugsim",
                path = %file.path.display(),
                "dropping diagnostic: {e}"
            );
        }
    }

    /// Emits a debug-level message.
    pub fn debug(&self, tag: &str, message: &str) {
        self.log(Level::Debug, tag, message);
    }

    /// Emits an info-level message.
    pub fn info(&self, tag: &str, message: &str) {
        self.log(Level::Info, tag, message);
    }

    /// Emits a warning.
    pub fn warn(&self, tag: &str, message: &str) {
        self.log(Level::Warn, tag, message);
    }

    /// Emits an error-level message.
    pub fn error(&self, tag: &str, message: &str) {
        self.log(Level::Error, tag, message);
    }

    /// Flushes the log file, if any.
    pub fn flush(&self) {
        if let Some(file) = &self.file {
            let _ = file.writer.borrow_mut().flush();
        }
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticSink")
            .field("log_path", &self.log_path())
            .finish()
    }
}
