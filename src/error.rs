//! Unified error types for hwid-diff.
//!
//! Parsing, comparison and I/O failures all surface as [`HwidDiffError`].
//! Per-section parse problems are not errors: they are recorded on the
//! parsed snapshot as dropped sections.

use std::path::PathBuf;
use thiserror::Error;

/// Fixed code carried by every [`HwidDiffError::Comparison`].
pub const COMPARISON_FAILED_CODE: u32 = 4001;

/// Boxed cause kept inside a comparison failure.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for hwid-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HwidDiffError {
    /// A snapshot could not be parsed at all
    #[error("Failed to parse snapshot: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// The match/detect stage failed
    #[error("Comparison failed (code {code}): {context}")]
    Comparison {
        code: u32,
        context: String,
        #[source]
        source: BoxedCause,
    },

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("snapshot text is empty")]
    EmptySnapshot,
}

/// Convenient Result type for hwid-diff operations
pub type Result<T> = std::result::Result<T, HwidDiffError>;

impl HwidDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create the error raised for empty snapshot input
    pub fn empty_snapshot() -> Self {
        Self::parse("no content", ParseErrorKind::EmptySnapshot)
    }

    /// Wrap a failure from the match/detect stage.
    pub fn comparison_failed(context: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self::Comparison {
            code: COMPARISON_FAILED_CODE,
            context: context.into(),
            source: source.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns true if this error came from cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The fixed error code, for comparison failures.
    #[must_use]
    pub const fn code(&self) -> Option<u32> {
        match self {
            Self::Comparison { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HwidDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained: adding "reading base" to an error whose
/// context is "no content" yields "reading base: no content".
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<HwidDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: HwidDiffError, new_ctx: &str) -> HwidDiffError {
    match err {
        HwidDiffError::Parse {
            context: existing,
            source,
        } => HwidDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        HwidDiffError::Comparison {
            code,
            context: existing,
            source,
        } => HwidDiffError::Comparison {
            code,
            context: chain_context(new_ctx, &existing),
            source,
        },
        HwidDiffError::Io {
            path,
            message,
            source,
        } => HwidDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        HwidDiffError::Config(msg) => HwidDiffError::Config(chain_context(new_ctx, &msg)),
        // Cancellation carries no context
        HwidDiffError::Cancelled => HwidDiffError::Cancelled,
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
