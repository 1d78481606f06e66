use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdmefError>;

/// Failures of a single value conversion (attribute or text content).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("`{value}` is not a valid integer")]
    InvalidInteger { value: String },

    #[error("`{value}` is not a valid real number")]
    InvalidReal { value: String },

    #[error("`{value}` is not a known {enum_name} keyword")]
    UnknownKeyword {
        enum_name: &'static str,
        value: String,
    },

    #[error("`{value}` is not a valid NTP stamp (expected `0x<8 hex digits>.0x<8 hex digits>`)")]
    InvalidNtpStamp { value: String },

    #[error("time element has no NTP stamp")]
    MissingNtpStamp,

    #[error("hex buffer must have an even length, found {len} characters")]
    OddLengthHex { len: usize },

    #[error("`{value}` is not a valid hex buffer")]
    InvalidHex { value: String },

    #[error("invalid port range {min}-{max}, the lower bound must be below the upper bound")]
    InvalidPortRange { min: u16, max: u16 },

    #[error("`{value}` is not a valid port list")]
    InvalidPortList { value: String },

    #[error("`{value}` is not a valid IDMEF date-time: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("`{value}` is not a valid time offset (expected `hh:mm`)")]
    InvalidTimeOffset { value: String },
}

/// Failures while building or loading a tag name table.
#[derive(Debug, Error)]
pub enum TagNamesError {
    #[error("unknown logical element name `{0}`")]
    UnknownTag(String),

    #[error("element name for `{0}` must not be empty")]
    EmptyName(&'static str),

    #[error("`{first}` and `{second}` are both mapped to `{name}`")]
    DuplicateName {
        first: &'static str,
        second: &'static str,
        name: String,
    },

    #[error("failed to parse tag name table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read tag name table `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum IdmefError {
    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("DOCTYPE declarations are not accepted (found at byte {position})")]
    DoctypeForbidden { position: u64 },

    #[error("document nesting exceeds the configured limit of {limit} levels")]
    DepthLimitExceeded { limit: usize },

    #[error("unexpected root element `{found}`, expected `{expected}`")]
    UnexpectedRoot { expected: String, found: String },

    #[error("`{found}` is neither a Heartbeat nor an Alert")]
    UnknownMessageKind { found: String },

    #[error("message root does not contain a Heartbeat or an Alert")]
    EmptyMessage,

    #[error("alert carries both `{first}` and `{second}`, at most one subtype is allowed")]
    MultipleAlertSubtypes { first: String, second: String },

    #[error("service carries both `{first}` and `{second}`, at most one subtype is allowed")]
    MultipleServiceSubtypes { first: String, second: String },

    #[error("invalid value in `{element}`: {source}")]
    Value {
        element: String,
        #[source]
        source: ValueError,
    },

    #[error(transparent)]
    TagNames(#[from] TagNamesError),

    #[error("I/O error while {action}: {source}")]
    Io {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl IdmefError {
    pub(crate) fn value(element: impl Into<String>, source: ValueError) -> Self {
        IdmefError::Value {
            element: element.into(),
            source,
        }
    }

    pub(crate) fn xml(position: u64, err: impl std::fmt::Display) -> Self {
        IdmefError::Xml {
            position,
            message: err.to_string(),
        }
    }
}
