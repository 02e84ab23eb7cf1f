use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use tracing_error::SpanTrace;

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Better control over error handling
- Span traces are captured at the point of failure via tracing-error
- Callers in the menu loop need to tell a missing file apart from a bad index
 */

/// Error variants that can occur in pantry operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A product index (0-based) outside the current collection
    InvalidIndex { index: usize, len: usize },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/* 📖 # Why separate ErrorKind and PantryError?
- ErrorKind: structural variants with specific contexts (file paths, indices)
- PantryError: wraps ErrorKind with a context stack and the span trace at creation

Callers pattern match on ErrorKind, while propagation code only attaches context.
*/

/// Error type wrapping [`ErrorKind`] with context strings and a captured span trace.
#[derive(Debug)]
pub struct PantryError {
    kind: ErrorKind,
    context: Vec<String>,
    span_trace: SpanTrace,
}

impl PantryError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a [`ErrorKind::Message`] error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates a [`ErrorKind::FileError`] for the given path.
    pub fn file_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::new(ErrorKind::FileError {
            path: path.into(),
            source,
        })
    }

    /// Creates a [`ErrorKind::InvalidIndex`] error.
    pub fn invalid_index(index: usize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidIndex { index, len })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Context strings in the order they were attached.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// The span trace captured when the error was created.
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// Returns the innermost error in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }
}

impl From<ErrorKind> for PantryError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for PantryError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::InvalidIndex { .. } | ErrorKind::Message { .. } => None,
        }
    }
}

impl fmt::Display for PantryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ctx in &self.context {
            write!(f, "{}: ", ctx)?;
        }

        match &self.kind {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::InvalidIndex { index, len } => {
                write!(f, "Index {} out of range for {} products", index, len)
            }
            ErrorKind::Message { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/* 📖 # Why use Box<PantryError> in the result type?

Boxing the error keeps the result small, making it cheap to return in the common case.
*/

/// Standard result type for pantry operations.
pub type PantryResult<T> = std::result::Result<T, Box<PantryError>>;

/// Extension trait for attaching context to Results during propagation.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    fn context(self, context: impl Into<String>) -> PantryResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> PantryResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for PantryResult<T> {
    fn context(self, context: impl Into<String>) -> PantryResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> PantryResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Creates a boxed [`PantryError`] with a formatted message.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::PantryError::message(format!($($arg)*)))
    };
}

/// Returns early with a boxed [`PantryError`] with a formatted message.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::err!($($arg)*))
    };
}
