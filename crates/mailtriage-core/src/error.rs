//! Error types for the core library.

use thiserror::Error;

/// The step of a message move at which a failure occurred.
///
/// A move is a fixed sequence: select the source folder, copy to the
/// target, flag the original `\Deleted`, expunge. A failure at one step
/// stops the sequence, so a partially moved message can be diagnosed from
/// the step alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStep {
    /// Selecting the source folder.
    Select,
    /// Copying the message to the target folder.
    Copy,
    /// Flagging the original message `\Deleted`.
    MarkDeleted,
    /// Expunging the source folder.
    Expunge,
}

impl std::fmt::Display for MoveStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Select => "select",
            Self::Copy => "copy",
            Self::MarkDeleted => "mark-deleted",
            Self::Expunge => "expunge",
        };
        f.write_str(s)
    }
}

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IMAP operation failed.
    #[error("IMAP error: {0}")]
    Imap(#[from] mailtriage_imap::Error),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Folder provisioning failed.
    #[error("Could not provision folder '{folder}': {source}")]
    Folder {
        /// The folder that could not be created.
        folder: String,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// A message move failed partway through its sequence.
    #[error("Move failed at {step} step: {source}")]
    Move {
        /// Step at which the sequence stopped.
        step: MoveStep,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// Delegate classifier returned an unusable reply.
    #[error("Delegate classifier error: {0}")]
    Delegate(String),

    /// HTTP request to the delegate classifier failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Credential storage error.
    #[error("Credential error: {0}")]
    Credential(#[from] crate::account::credentials::CredentialError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
