//! Error types for gesture recognition and action dispatch.
//!
//! This module provides error handling using [`thiserror`] for automatic
//! `Display` and `Error` trait implementations.
//!
//! # Error Hierarchy
//!
//! - [`GestureError`]: Top-level error type for the crate
//! - [`ActionError`]: Errors raised by action sinks while performing a
//!   gesture's side effect
//!
//! Classification itself never fails for well-formed input: an
//! unrecognized pose is reported as an `Unknown` classification with low
//! confidence, not an error. Malformed keypoint sets fail fast with
//! [`GestureError::InvalidInput`] at the input boundary, and action
//! failures are contained inside the spawned action task (logged, never
//! propagated to the recognition loop).

use thiserror::Error;

/// A specialized `Result` type for gesture operations.
pub type GestureResult<T> = Result<T, GestureError>;

/// Top-level error type for the hand-gestures crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GestureError {
    /// Malformed keypoint input (wrong landmark count or out-of-range
    /// coordinates). Fails fast at the input boundary; never caught
    /// internally.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what made the input invalid
        message: String,
    },

    /// Invalid dispatcher or engine configuration.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Action side-effect error, surfaced only inside spawned action
    /// tasks.
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
}

impl GestureError {
    /// Creates a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Errors raised by an [`ActionSink`](crate::action::ActionSink) while
/// invoking a gesture's bound action.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ActionError {
    /// The named action resource does not exist or cannot be opened.
    #[error("Action resource unavailable: '{resource}'")]
    Unavailable {
        /// Identifier of the missing resource
        resource: String,
    },

    /// The execution backend failed or is not present on this platform.
    #[error("Action backend error: {message}")]
    Backend {
        /// Description of the backend failure
        message: String,
    },
}

impl ActionError {
    /// Creates a new unavailable-resource error.
    #[must_use]
    pub fn unavailable(resource: impl Into<String>) -> Self {
        Self::Unavailable {
            resource: resource.into(),
        }
    }

    /// Creates a new backend error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is recoverable on a later invocation.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Backend { .. } => true,
            Self::Unavailable { .. } => false,
        }
    }
}
