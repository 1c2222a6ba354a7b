use thiserror::Error;

use crate::page::page_model::ControlRef;

/// Failure reported by a `PageHost` while reading or writing one control.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    /// The handle no longer points at a live control (the DOM changed).
    #[error("control {0} is no longer attached to the page")]
    StaleControl(ControlRef),

    /// The operation does not apply to this kind of control.
    #[error("control {control} does not support {operation}")]
    Unsupported {
        control: ControlRef,
        operation: &'static str,
    },

    /// The page refused the write.
    #[error("control {0} is read-only")]
    ReadOnly(ControlRef),
}

/// Internal failure while producing a value; never leaves the generator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerateError {
    #[error("malformed {attribute} constraint: {value:?}")]
    MalformedBound { attribute: &'static str, value: String },

    #[error("empty numeric range: min {min} > max {max}")]
    EmptyRange { min: i64, max: i64 },

    #[error("could not compute {0}")]
    Calendar(&'static str),
}

/// Failure when persisting settings. Reads never fail; they fall back to defaults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("settings serialization ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure delivering a message between contexts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MessagingError {
    /// The receiving context has not started listening or has gone away.
    #[error("receiving context is not ready")]
    NotReady,

    /// The receiver accepted the message but dropped it without answering.
    #[error("receiving context did not answer {0}")]
    NoResponse(String),

    #[error("timed out after {0} ms waiting for a reply")]
    Timeout(u64),

    #[error("unexpected reply: expected {expected}, got {got}")]
    UnexpectedReply { expected: &'static str, got: String },

    #[error("no content context registered for tab {0}")]
    UnknownTab(u32),

    #[error("no active tab")]
    NoActiveTab,
}

impl MessagingError {
    /// Whether a later attempt could succeed once the receiver becomes ready.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            MessagingError::NotReady
                | MessagingError::NoResponse(_)
                | MessagingError::Timeout(_)
                | MessagingError::UnknownTab(_)
        )
    }
}
