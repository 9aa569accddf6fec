//! Category-to-folder mapping.

use crate::triage::Category;

/// Maps triage categories to IMAP folder names.
///
/// Every mapping carries an entry for [`Category::Other`], which doubles
/// as the fallback for categories without an explicit entry.
#[derive(Debug, Clone)]
pub struct FolderMapping {
    entries: Vec<(Category, String)>,
}

/// Fallback folder when a custom mapping omits [`Category::Other`].
const FALLBACK_FOLDER: &str = "Archive";

impl Default for FolderMapping {
    fn default() -> Self {
        Self {
            entries: vec![
                (Category::Urgent, "Urgent".to_string()),
                (Category::Important, "Important".to_string()),
                (Category::Newsletter, "Newsletters".to_string()),
                (Category::Promotional, "Promotions".to_string()),
                (Category::OtpReceipt, "Receipts".to_string()),
                (Category::Other, FALLBACK_FOLDER.to_string()),
            ],
        }
    }
}

impl FolderMapping {
    /// Builds a mapping from explicit pairs.
    ///
    /// Later entries for the same category are ignored. If no entry for
    /// [`Category::Other`] is given, one is appended pointing at
    /// `Archive` so the fallback always resolves.
    #[must_use]
    pub fn custom<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Category, S)>,
        S: Into<String>,
    {
        let mut entries: Vec<(Category, String)> = Vec::new();
        for (category, folder) in pairs {
            if !entries.iter().any(|(c, _)| *c == category) {
                entries.push((category, folder.into()));
            }
        }
        if !entries.iter().any(|(c, _)| *c == Category::Other) {
            entries.push((Category::Other, FALLBACK_FOLDER.to_string()));
        }
        Self { entries }
    }

    /// Returns the folder for a category, falling back to the
    /// [`Category::Other`] entry.
    #[must_use]
    pub fn folder_for(&self, category: Category) -> &str {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .or_else(|| self.entries.iter().find(|(c, _)| *c == Category::Other))
            .map_or(FALLBACK_FOLDER, |(_, folder)| folder)
    }

    /// Folders that need to exist on the server, in mapping order,
    /// deduplicated, with the inbox excluded since it always exists.
    #[must_use]
    pub fn provisionable(&self) -> Vec<&str> {
        let mut folders: Vec<&str> = Vec::new();
        for (_, folder) in &self.entries {
            if folder.eq_ignore_ascii_case("inbox") {
                continue;
            }
            if !folders
                .iter()
                .any(|seen| seen.eq_ignore_ascii_case(folder))
            {
                folders.push(folder);
            }
        }
        folders
    }
}
