//! Triage data models.

use serde::{Deserialize, Serialize};

/// An email reduced to the fields the classifier looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Subject line.
    pub subject: String,
    /// Plain-text body. May be empty when only headers were fetched.
    pub body: String,
    /// Raw From header value.
    pub sender: String,
}

impl Message {
    /// Convenience constructor.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            sender: sender.into(),
        }
    }
}

/// Classification category, from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Urgent language from a known contact.
    Urgent,
    /// Known contact or urgent language, but not both.
    Important,
    /// Mailing-list and subscription content.
    Newsletter,
    /// Marketing and sales content.
    Promotional,
    /// One-time passwords, verification codes, receipts, invoices.
    OtpReceipt,
    /// Everything else.
    Other,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Urgent,
        Self::Important,
        Self::Newsletter,
        Self::Promotional,
        Self::OtpReceipt,
        Self::Other,
    ];

    /// Wire representation, matching the delegate classifier schema.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "URGENT",
            Self::Important => "IMPORTANT",
            Self::Newsletter => "NEWSLETTER",
            Self::Promotional => "PROMOTIONAL",
            Self::OtpReceipt => "OTP_RECEIPT",
            Self::Other => "OTHER",
        }
    }

    /// Strict parse of the wire representation.
    ///
    /// Returns `None` for anything outside the six known categories, so a
    /// delegate reply with an invented category is rejected rather than
    /// silently mapped.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "URGENT" => Some(Self::Urgent),
            "IMPORTANT" => Some(Self::Important),
            "NEWSLETTER" => Some(Self::Newsletter),
            "PROMOTIONAL" => Some(Self::Promotional),
            "OTP_RECEIPT" => Some(Self::OtpReceipt),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The automation action attached to a classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// File the message into the named folder.
    MoveToFolder(String),
    /// Leave the message in place and flag it high priority.
    FlagPriority,
}

impl Action {
    /// Strict parse of the wire representation.
    ///
    /// Accepts `MOVE_TO_FOLDER: <name>` with a non-empty name, and
    /// `FLAG_PRIORITY: High`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s == "FLAG_PRIORITY: High" {
            return Some(Self::FlagPriority);
        }
        let folder = s.strip_prefix("MOVE_TO_FOLDER: ")?.trim();
        if folder.is_empty() {
            return None;
        }
        Some(Self::MoveToFolder(folder.to_string()))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MoveToFolder(folder) => write!(f, "MOVE_TO_FOLDER: {folder}"),
            Self::FlagPriority => f.write_str("FLAG_PRIORITY: High"),
        }
    }
}

/// The outcome of classifying one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageResult {
    /// Assigned category.
    pub category: Category,
    /// Action for downstream automation.
    pub action: Action,
    /// One-sentence explanation of the decision.
    pub justification: String,
}
