//! Mailbox types.

/// Mailbox name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mailbox(pub String);

impl Mailbox {
    /// Creates a new mailbox name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The INBOX mailbox (case-insensitive per RFC).
    #[must_use]
    pub fn inbox() -> Self {
        Self("INBOX".to_string())
    }

    /// Returns the mailbox name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this names the root inbox, case-insensitively.
    #[must_use]
    pub fn is_inbox(&self) -> bool {
        self.0.eq_ignore_ascii_case("INBOX")
    }
}

impl std::fmt::Display for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mailbox status information from SELECT.
#[derive(Debug, Clone, Copy, Default)]
pub struct MailboxStatus {
    /// Number of messages in the mailbox.
    pub exists: u32,
    /// Number of recent messages.
    pub recent: u32,
}

/// A single LIST response line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Raw attribute strings, e.g. `\HasNoChildren`.
    pub attributes: Vec<String>,
    /// Hierarchy delimiter, if the server reported one.
    pub delimiter: Option<char>,
    /// Mailbox name.
    pub mailbox: Mailbox,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbox_case_insensitive() {
        assert!(Mailbox::new("INBOX").is_inbox());
        assert!(Mailbox::new("inbox").is_inbox());
        assert!(Mailbox::new("Inbox").is_inbox());
        assert!(!Mailbox::new("Archive").is_inbox());
    }

    #[test]
    fn test_display() {
        assert_eq!(Mailbox::new("Receipts").to_string(), "Receipts");
    }

    #[test]
    fn test_status_default() {
        let status = MailboxStatus::default();
        assert_eq!(status.exists, 0);
        assert_eq!(status.recent, 0);
    }
}
