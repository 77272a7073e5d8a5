use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use tracing_error::SpanTrace;

/// Error variants that can occur in gazette operations.
/// Each variant carries the data needed to describe the failure.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization or deserialization failed
    Json { source: serde_json::Error },

    /// Catch-all for errors described by a message
    Message { message: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::Json { source } => {
                write!(f, "JSON error: {}", source)
            }
            ErrorKind::Message { message } => {
                write!(f, "{message}")
            }
        }
    }
}

/// Error type wrapping an [`ErrorKind`] with attached context lines,
/// an optional cause and the span trace captured at construction.
pub struct GazetteError {
    kind: ErrorKind,
    context: Vec<String>,
    cause: Option<Box<GazetteError>>,
    span_trace: SpanTrace,
}

impl GazetteError {
    /// Creates a new error from an [`ErrorKind`], capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            cause: None,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a message error from anything string-like.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Attaches context to the error.
    /// Context is displayed before the error message, oldest first.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F: FnOnce() -> String>(mut self, context_fn: F) -> Self {
        self.context.push(context_fn());
        self
    }

    /// Records another error as the cause of this one.
    pub fn caused_by(mut self, cause: GazetteError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns a reference to the underlying [`ErrorKind`].
    /// Allows pattern matching on specific error variants.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the attached context lines, oldest first.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// Returns the span trace captured when this error was created.
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// Returns the innermost error in the source chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        let entries = self.context.len() + usize::from(self.cause.is_some());
        for (index, context) in self.context.iter().enumerate() {
            let connector = if index + 1 == entries { "└─" } else { "├─" };
            writeln!(f, "{pad}{connector} {context}")?;
        }
        if let Some(cause) = &self.cause {
            writeln!(f, "{pad}└─ cause: {}", cause.kind)?;
            cause.write_tree(f, indent + 3)?;
        }
        Ok(())
    }
}

impl fmt::Display for GazetteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Context first, oldest to newest, then the error itself
        for context in &self.context {
            write!(f, "{context}: ")?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Debug for GazetteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        self.write_tree(f, 0)?;
        let trace = self.span_trace.to_string();
        if !trace.is_empty() {
            writeln!(f, "Trace: {trace}")?;
        }
        Ok(())
    }
}

impl From<ErrorKind> for GazetteError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for GazetteError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        if let Some(cause) = &self.cause {
            let cause: &(dyn StdError + 'static) = &**cause;
            return Some(cause);
        }
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::Json { source } => Some(source),
            ErrorKind::Message { .. } => None,
        }
    }
}

/// Result type alias using boxed [`GazetteError`] as the error type.
pub type GazetteResult<T> = std::result::Result<T, Box<GazetteError>>;

/// Extension trait for attaching context to results.
pub trait ResultExt<T> {
    /// Attaches context to the error, if any.
    fn context(self, context: impl Into<String>) -> GazetteResult<T>;
    /// Attaches lazily evaluated context to the error, if any.
    fn with_context(self, context_fn: impl FnOnce() -> String) -> GazetteResult<T>;
}

impl<T> ResultExt<T> for GazetteResult<T> {
    fn context(self, context: impl Into<String>) -> GazetteResult<T> {
        self.map_err(|error| Box::new(error.context(context)))
    }

    fn with_context(self, context_fn: impl FnOnce() -> String) -> GazetteResult<T> {
        self.map_err(|error| Box::new(error.with_context(context_fn)))
    }
}

/// Creates a boxed message error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::GazetteError::message(format!($($arg)*)))
    };
}
