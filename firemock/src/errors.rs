use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for Firemock operations.
///
/// Callers are expected to branch on the kind, never on the message text.
///
/// # Examples
///
/// ```rust
/// use firemock::errors::{ErrorKind, FiremockError, FiremockResult};
///
/// fn lookup() -> FiremockResult<()> {
///     Err(FiremockError::new("document not found", ErrorKind::DocumentNotFound))
/// }
///
/// assert!(lookup().unwrap_err().is_not_found());
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// A resource path has an empty segment or the wrong segment count
    InvalidPath,
    /// A field path has an empty segment
    InvalidFieldPath,
    /// A collection along a path does not exist
    CollectionNotFound,
    /// A document along a path does not exist
    DocumentNotFound,
    /// A write declared that its target must exist and it does not
    PreconditionFailed,
    /// A configuration value or request argument is not acceptable
    InvalidArgument,
    /// A bulk-load source has the wrong shape or undecodable content
    LoadError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidPath => write!(f, "Invalid path"),
            ErrorKind::InvalidFieldPath => write!(f, "Invalid field path"),
            ErrorKind::CollectionNotFound => write!(f, "Collection not found"),
            ErrorKind::DocumentNotFound => write!(f, "Document not found"),
            ErrorKind::PreconditionFailed => write!(f, "Precondition failed"),
            ErrorKind::InvalidArgument => write!(f, "Invalid argument"),
            ErrorKind::LoadError => write!(f, "Load error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Firemock error type.
///
/// `FiremockError` carries a message, an [ErrorKind], an optional cause and the
/// backtrace captured where it was created.
///
/// # Examples
///
/// ```rust
/// use firemock::errors::{ErrorKind, FiremockError};
///
/// let cause = FiremockError::new("document not found", ErrorKind::DocumentNotFound);
/// let err = FiremockError::new_with_cause(
///     "update requires an existing document",
///     ErrorKind::PreconditionFailed,
///     cause,
/// );
/// assert_eq!(err.kind(), &ErrorKind::PreconditionFailed);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct FiremockError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<FiremockError>>,
    backtrace: Arc<Backtrace>,
}

impl FiremockError {
    /// Creates a new `FiremockError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        FiremockError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `FiremockError` wrapping the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: FiremockError) -> Self {
        FiremockError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&FiremockError> {
        self.cause.as_deref()
    }

    /// Returns `true` for [ErrorKind::CollectionNotFound] and [ErrorKind::DocumentNotFound].
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.error_kind,
            ErrorKind::CollectionNotFound | ErrorKind::DocumentNotFound
        )
    }
}

impl Display for FiremockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for FiremockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for FiremockError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Firemock operations.
pub type FiremockResult<T> = Result<T, FiremockError>;

impl From<serde_json::Error> for FiremockError {
    fn from(err: serde_json::Error) -> Self {
        FiremockError::new(&format!("JSON parsing error: {}", err), ErrorKind::LoadError)
    }
}

impl From<base64::DecodeError> for FiremockError {
    fn from(err: base64::DecodeError) -> Self {
        FiremockError::new(&format!("Base64 decoding error: {}", err), ErrorKind::LoadError)
    }
}
