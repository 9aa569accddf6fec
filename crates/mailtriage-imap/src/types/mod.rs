//! Core IMAP types.
//!
//! The subset of RFC 3501/9051 types needed by the folder synchronizer:
//! mailbox names, message flags, sequence numbers and sets, and response
//! status words.

mod flags;
mod identifiers;
mod mailbox;
mod sequence;

pub use flags::Flag;
pub use identifiers::SeqNum;
pub use mailbox::{ListItem, Mailbox, MailboxStatus};
pub use sequence::SequenceSet;

/// Response status word from a tagged or untagged status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Command completed successfully.
    Ok,
    /// Command failed (operational error).
    No,
    /// Command was malformed or invalid in this state.
    Bad,
    /// Server is closing the connection.
    Bye,
    /// Connection is pre-authenticated.
    PreAuth,
}

impl Status {
    /// Parses a status word, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "OK" => Some(Self::Ok),
            "NO" => Some(Self::No),
            "BAD" => Some(Self::Bad),
            "BYE" => Some(Self::Bye),
            "PREAUTH" => Some(Self::PreAuth),
            _ => None,
        }
    }
}
