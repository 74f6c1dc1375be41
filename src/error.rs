//! Error types shared by registration and parsing.

use thiserror::Error;

/// Boxed error returned by option handlers and text-value conversions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while registering options or parsing arguments.
///
/// Registration errors (`DuplicateOption`, `ShortAndLongEmpty`) indicate a
/// mistake in the option table itself. Parse errors (`NoSuchOption`,
/// `OptionRequiresValue`, `ParsingValue`) indicate bad user input. Errors
/// returned by an option handler are carried in `Handler` and display
/// exactly as the handler produced them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no such option: {0}")]
    NoSuchOption(String),

    #[error("option requires value: {0}")]
    OptionRequiresValue(String),

    #[error("failure parsing option value: {arg}")]
    ParsingValue {
        arg: String,
        #[source]
        source: BoxError,
    },

    #[error("duplicate option: {0}")]
    DuplicateOption(String),

    #[error("long and short options both empty")]
    ShortAndLongEmpty,

    #[error(transparent)]
    Handler(BoxError),
}

/// The kind of an [`Error`], independent of its detail text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoSuchOption,
    OptionRequiresValue,
    ParsingValue,
    DuplicateOption,
    ShortAndLongEmpty,
    /// An error returned by an option handler.
    Handler,
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoSuchOption(_) => ErrorKind::NoSuchOption,
            Error::OptionRequiresValue(_) => ErrorKind::OptionRequiresValue,
            Error::ParsingValue { .. } => ErrorKind::ParsingValue,
            Error::DuplicateOption(_) => ErrorKind::DuplicateOption,
            Error::ShortAndLongEmpty => ErrorKind::ShortAndLongEmpty,
            Error::Handler(_) => ErrorKind::Handler,
        }
    }

    /// Check whether this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }

    /// Unwrap the error a handler returned, if this is one.
    pub fn into_handler_error(self) -> Option<BoxError> {
        match self {
            Error::Handler(e) => Some(e),
            _ => None,
        }
    }
}
