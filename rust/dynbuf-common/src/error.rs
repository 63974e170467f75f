use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn out_of_memory(requested: usize, source: TryReserveError) -> Error {
        Error(ErrorKind::OutOfMemory { requested, source }.into())
    }

    pub fn capacity_overflow(length: usize, additional: usize) -> Error {
        Error(ErrorKind::CapacityOverflow { length, additional }.into())
    }

    /// Returns `true` if the error was caused by an allocation failure.
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfMemory { .. })
    }

    /// Returns `true` if the error was caused by a rejected argument.
    pub fn is_invalid_arg(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArgument { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("failed to allocate a backing region of {requested} bytes")]
    OutOfMemory {
        requested: usize,
        source: TryReserveError,
    },

    #[error("capacity overflow: length {length} + {additional} additional bytes")]
    CapacityOverflow { length: usize, additional: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        let kind = match e.kind() {
            ErrorKind::InvalidArgument { .. } => std::io::ErrorKind::InvalidInput,
            ErrorKind::OutOfMemory { .. } | ErrorKind::CapacityOverflow { .. } => {
                std::io::ErrorKind::OutOfMemory
            }
        };
        std::io::Error::new(kind, e)
    }
}
