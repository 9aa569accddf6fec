//! Known-contact address book.

/// Addresses the user considers known senders.
///
/// Entries are normalized to lowercase at insertion. A sender matches when
/// any entry appears as a substring of the lowercased sender field, so
/// `boss@example.com` matches `"The Boss" <boss@example.com>`.
#[derive(Debug, Clone, Default)]
pub struct KnownContacts {
    entries: Vec<String>,
}

impl KnownContacts {
    /// Builds a contact list from the given addresses.
    #[must_use]
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut contacts = Self::default();
        for address in addresses {
            contacts.add(address.as_ref());
        }
        contacts
    }

    /// Adds an address, ignoring blanks and duplicates.
    pub fn add(&mut self, address: &str) {
        let normalized = address.trim().to_lowercase();
        if !normalized.is_empty() && !self.entries.contains(&normalized) {
            self.entries.push(normalized);
        }
    }

    /// Returns true if the sender matches any known contact.
    #[must_use]
    pub fn is_known(&self, sender: &str) -> bool {
        let sender = sender.to_lowercase();
        self.entries.iter().any(|entry| sender.contains(entry))
    }

    /// Number of stored contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no contacts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match() {
        let contacts = KnownContacts::new(["boss@example.com"]);
        assert!(contacts.is_known("boss@example.com"));
        assert!(contacts.is_known("\"The Boss\" <Boss@Example.com>"));
        assert!(!contacts.is_known("stranger@example.com"));
    }

    #[test]
    fn test_case_insensitive_entries() {
        let contacts = KnownContacts::new(["Professor@University.EDU"]);
        assert!(contacts.is_known("professor@university.edu"));
    }

    #[test]
    fn test_blanks_and_duplicates_skipped() {
        let mut contacts = KnownContacts::new(["a@b.com", "  ", "A@B.COM"]);
        assert_eq!(contacts.len(), 1);
        contacts.add("a@b.com");
        assert_eq!(contacts.len(), 1);
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let contacts = KnownContacts::default();
        assert!(contacts.is_empty());
        assert!(!contacts.is_known("anyone@example.com"));
    }
}
