use thiserror::Error;

use crate::SourceKind;

/// Failure signal from a single external data source.
///
/// Sources never panic or print past their boundary; every failure mode is
/// mapped to one of these variants and handled per the report's degradation
/// policy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The source was reached but could not produce data.
    #[error("{kind} source failed: {msg}")]
    Failed {
        /// Which source failed.
        kind: SourceKind,
        /// Human-readable error message.
        msg: String,
    },

    /// The source has no data for the requested resource.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "quotes for AAPL".
        what: String,
    },

    /// The source call exceeded the configured timeout.
    #[error("{kind} source timed out")]
    Timeout {
        /// Which source timed out.
        kind: SourceKind,
    },
}

impl SourceError {
    /// Helper: build a `Failed` error for a source kind and message.
    pub fn failed(kind: SourceKind, msg: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `Timeout` error.
    #[must_use]
    pub const fn timeout(kind: SourceKind) -> Self {
        Self::Timeout { kind }
    }
}

/// Malformed or oversized wire frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The length prefix declares a body larger than the configured maximum.
    #[error("frame of {len} bytes exceeds maximum of {max} bytes")]
    Oversized {
        /// Declared (or attempted) body length.
        len: u64,
        /// Configured maximum body length.
        max: u64,
    },

    /// The connection closed before the full frame arrived.
    #[error("truncated frame: expected {expected} bytes, received {received}")]
    Truncated {
        /// Number of bytes the frame required.
        expected: u64,
        /// Number of bytes actually received.
        received: u64,
    },

    /// The body is not valid UTF-8 or not a valid JSON message.
    #[error("malformed frame: {0}")]
    Malformed(String),
}

/// Unified error type for the finreport workspace.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Empty or malformed ticker, rejected before any source is contacted.
    #[error("invalid ticker: {0}")]
    InvalidTicker(String),

    /// Issues with returned or expected data (ordering, non-finite values, ...).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid configuration supplied to a builder.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A data source failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A wire frame could not be encoded or decoded.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The underlying byte stream failed (reset, aborted, broken pipe).
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The server answered with an error response.
    #[error("server error: {message}")]
    Remote {
        /// Message carried by the error response.
        message: String,
    },

    /// The client session lost its connection; the session is over.
    #[error("connection error: {0}")]
    Connection(String),

    /// The session has already been closed.
    #[error("session closed")]
    SessionClosed,
}

impl ReportError {
    /// Helper: build a `Remote` error from a server message.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Helper: build a `Connection` error from any displayable cause.
    pub fn connection(cause: impl core::fmt::Display) -> Self {
        Self::Connection(cause.to_string())
    }

    /// Returns `true` if this error ends the session it occurred in.
    ///
    /// Validation, source and remote errors are answered in-band and the
    /// session continues; framing and transport failures do not.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Frame(_) | Self::Transport(_) | Self::Connection(_) | Self::SessionClosed
        )
    }
}
