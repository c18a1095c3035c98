//! Error types for the Sapling generator engine.

use thiserror::Error;

/// Faults raised by generator construction and execution.
///
/// Generators return shrink trees rather than `Result`s, so these faults
/// surface as panics carrying the error's display form. Panics raised inside
/// user-supplied closures propagate unchanged; see [`crate::gen::Gen::try_with`]
/// for intercepting them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// An operation received an argument it cannot work with.
    #[error("invalid argument `{argument}`: {message}")]
    InvalidArgument {
        argument: &'static str,
        message: &'static str,
    },

    /// A state the engine guarantees unreachable was reached.
    #[error("internal invariant violated: {message}")]
    InternalInvariant { message: &'static str },
}

impl GenError {
    pub(crate) fn invalid_argument(argument: &'static str, message: &'static str) -> Self {
        GenError::InvalidArgument { argument, message }
    }

    pub(crate) fn internal(message: &'static str) -> Self {
        GenError::InternalInvariant { message }
    }
}
