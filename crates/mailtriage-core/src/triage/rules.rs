//! Deterministic rule-based classifier.
//!
//! Rules are checked in a fixed order, so every message lands in exactly
//! one category: newsletter, then OTP/receipt, then promotional, then the
//! known-contact/urgency tiers, with OTHER as the final fallback.

use crate::contacts::KnownContacts;

use super::model::{Action, Category, Message, TriageResult};

const NEWSLETTER_KEYWORDS: &[&str] = &["unsubscribe", "weekly update", "latest issue", "newsletter"];

const OTP_KEYWORDS: &[&str] = &["otp", "one time password", "verification code"];

const RECEIPT_KEYWORDS: &[&str] = &["receipt", "invoice", "order receipt", "payment receipt"];

const PROMOTIONAL_KEYWORDS: &[&str] = &[
    "sale",
    "offer",
    "discount",
    "buy now",
    "limited time",
    "promo",
    "promotional",
];

const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "immediately",
    "important",
    "action required",
    "deadline",
    "respond immediately",
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Rule-based triage classifier.
#[derive(Debug, Clone, Default)]
pub struct RuleBased {
    contacts: KnownContacts,
}

impl RuleBased {
    /// Creates a classifier with the given known contacts.
    #[must_use]
    pub const fn new(contacts: KnownContacts) -> Self {
        Self { contacts }
    }

    /// The known contacts this classifier consults.
    #[must_use]
    pub const fn contacts(&self) -> &KnownContacts {
        &self.contacts
    }

    /// Classifies a message.
    ///
    /// Total over all inputs: every message receives a category, an
    /// action, and a justification.
    #[must_use]
    pub fn classify(&self, message: &Message) -> TriageResult {
        let subject = message.subject.to_lowercase();
        let body = message.body.to_lowercase();

        if contains_any(&subject, NEWSLETTER_KEYWORDS) || contains_any(&body, NEWSLETTER_KEYWORDS) {
            return TriageResult {
                category: Category::Newsletter,
                action: Action::MoveToFolder("Newsletters".to_string()),
                justification:
                    "Message contains newsletter indicators like 'unsubscribe' or 'weekly update'."
                        .to_string(),
            };
        }

        let is_otp_receipt = contains_any(&subject, OTP_KEYWORDS)
            || contains_any(&subject, RECEIPT_KEYWORDS)
            || contains_any(&body, OTP_KEYWORDS)
            || contains_any(&body, RECEIPT_KEYWORDS);
        if is_otp_receipt {
            return TriageResult {
                category: Category::OtpReceipt,
                action: Action::MoveToFolder("Receipts".to_string()),
                justification:
                    "Subject or body indicates a receipt or verification/OTP (e.g., 'receipt', 'invoice', or 'otp')."
                        .to_string(),
            };
        }

        if contains_any(&subject, PROMOTIONAL_KEYWORDS) || contains_any(&body, PROMOTIONAL_KEYWORDS)
        {
            return TriageResult {
                category: Category::Promotional,
                action: Action::MoveToFolder("Promotions".to_string()),
                justification: "Contains promotional language such as 'sale', 'offer', or 'discount'."
                    .to_string(),
            };
        }

        let is_known_contact = self.contacts.is_known(&message.sender);
        let combined = format!("{subject} {body}");
        let has_urgency = contains_any(&combined, URGENCY_KEYWORDS);

        if is_known_contact && has_urgency {
            return TriageResult {
                category: Category::Urgent,
                action: Action::FlagPriority,
                justification:
                    "From a known contact and contains high-urgency language such as 'urgent' or 'ASAP'."
                        .to_string(),
            };
        }
        if is_known_contact {
            return TriageResult {
                category: Category::Important,
                action: Action::FlagPriority,
                justification: "From a known contact; marked important to ensure a timely response."
                    .to_string(),
            };
        }
        if has_urgency {
            return TriageResult {
                category: Category::Important,
                action: Action::FlagPriority,
                justification: "Contains urgent language; flagged for prompt attention.".to_string(),
            };
        }

        TriageResult {
            category: Category::Other,
            action: Action::MoveToFolder("Inbox".to_string()),
            justification:
                "No matching criteria for special categories; leave in Inbox for manual review."
                    .to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classifier() -> RuleBased {
        RuleBased::new(KnownContacts::new([
            "boss@example.com",
            "professor@university.edu",
        ]))
    }

    fn classify(subject: &str, body: &str, sender: &str) -> TriageResult {
        classifier().classify(&Message::new(subject, body, sender))
    }

    #[test]
    fn test_newsletter_by_subject() {
        let result = classify("Our latest issue is here", "hello", "news@site.com");
        assert_eq!(result.category, Category::Newsletter);
        assert_eq!(result.action.to_string(), "MOVE_TO_FOLDER: Newsletters");
    }

    #[test]
    fn test_newsletter_by_body() {
        let result = classify("Hello", "Click here to unsubscribe", "news@site.com");
        assert_eq!(result.category, Category::Newsletter);
    }

    #[test]
    fn test_otp() {
        let result = classify("Your OTP code", "123456", "noreply@bank.com");
        assert_eq!(result.category, Category::OtpReceipt);
        assert_eq!(result.action.to_string(), "MOVE_TO_FOLDER: Receipts");
    }

    #[test]
    fn test_receipt() {
        let result = classify(
            "Your Order Receipt #12345",
            "Thank you for your purchase! Total: $39.99.",
            "orders@shop-example.com",
        );
        assert_eq!(result.category, Category::OtpReceipt);
    }

    #[test]
    fn test_promotional() {
        let result = classify("Big sale this weekend", "50% discount on everything", "shop@x.com");
        assert_eq!(result.category, Category::Promotional);
        assert_eq!(result.action.to_string(), "MOVE_TO_FOLDER: Promotions");
    }

    #[test]
    fn test_urgent_known_contact_with_urgency() {
        let result = classify("URGENT: server down", "Need this fixed ASAP", "boss@example.com");
        assert_eq!(result.category, Category::Urgent);
        assert_eq!(result.action, Action::FlagPriority);
    }

    #[test]
    fn test_important_known_contact_without_urgency() {
        let result = classify("Lunch tomorrow?", "Are you free at noon?", "boss@example.com");
        assert_eq!(result.category, Category::Important);
        assert_eq!(result.action, Action::FlagPriority);
    }

    #[test]
    fn test_important_urgency_from_stranger() {
        let result = classify("Action required", "Your account needs attention", "x@y.com");
        assert_eq!(result.category, Category::Important);
    }

    #[test]
    fn test_other_fallback() {
        let result = classify("Hi", "Just checking in", "someone@somewhere.com");
        assert_eq!(result.category, Category::Other);
        assert_eq!(result.action.to_string(), "MOVE_TO_FOLDER: Inbox");
        assert!(result.justification.contains("manual review"));
    }

    #[test]
    fn test_newsletter_wins_over_urgency() {
        // Rule order is fixed: newsletter indicators beat urgency language.
        let result = classify("Urgent newsletter", "unsubscribe", "boss@example.com");
        assert_eq!(result.category, Category::Newsletter);
    }

    #[test]
    fn test_otp_wins_over_promotional() {
        let result = classify("Sale receipt", "your invoice", "shop@x.com");
        assert_eq!(result.category, Category::OtpReceipt);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let result = classify("UNSUBSCRIBE NOW", "", "x@y.com");
        assert_eq!(result.category, Category::Newsletter);
    }

    #[test]
    fn test_empty_message() {
        let result = classify("", "", "");
        assert_eq!(result.category, Category::Other);
    }

    proptest! {
        // The classifier is a total function: any input gets a category
        // and a non-empty justification.
        #[test]
        fn classify_is_total(subject in ".*", body in ".*", sender in ".*") {
            let result = classify(&subject, &body, &sender);
            prop_assert!(!result.justification.is_empty());
            prop_assert!(Category::ALL.contains(&result.category));
        }

        // Urgency alone never produces URGENT; that tier needs a known
        // contact as well.
        #[test]
        fn urgent_requires_known_contact(subject in ".*", body in ".*") {
            let result = RuleBased::default()
                .classify(&Message::new(subject, body, "stranger@nowhere.com"));
            prop_assert_ne!(result.category, Category::Urgent);
        }
    }
}
