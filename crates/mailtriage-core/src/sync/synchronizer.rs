//! Folder synchronizer: provisioning, search, and message moves.

use tracing::{debug, info};

use crate::error::MoveStep;
use crate::triage::Category;
use crate::{Error, Result};

use super::mapping::FolderMapping;
use super::store::{MailStore, MessageHandle};

/// Drives a [`MailStore`] according to a [`FolderMapping`].
///
/// Operations connect on demand; there is no retry, and a failed move is
/// not rolled back. The error's [`MoveStep`] records how far the sequence
/// got, and since COPY precedes the delete, the worst case is a duplicate
/// message, never a lost one.
#[derive(Debug)]
pub struct FolderSynchronizer<S> {
    store: S,
    mapping: FolderMapping,
}

impl<S: MailStore> FolderSynchronizer<S> {
    /// Creates a synchronizer over a store.
    pub fn new(store: S, mapping: FolderMapping) -> Self {
        Self { store, mapping }
    }

    /// The mapping in use.
    #[must_use]
    pub const fn mapping(&self) -> &FolderMapping {
        &self.mapping
    }

    /// Resolves the destination folder for a category.
    #[must_use]
    pub fn folder_for(&self, category: Category) -> &str {
        self.mapping.folder_for(category)
    }

    /// Creates every mapped folder that does not yet exist.
    ///
    /// Existing folders are compared case-insensitively and skipped, so
    /// repeated runs issue no CREATEs. Stops at the first folder that
    /// cannot be created.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Folder`] naming the folder that failed.
    pub async fn ensure_folders_exist(&mut self) -> Result<()> {
        let existing = self.store.list_folders().await?;

        for folder in self.mapping.provisionable() {
            if existing.iter().any(|e| e.eq_ignore_ascii_case(folder)) {
                debug!(folder, "Folder already exists");
                continue;
            }
            if let Err(e) = self.store.create_folder(folder).await {
                return Err(Error::Folder {
                    folder: folder.to_string(),
                    source: Box::new(e),
                });
            }
        }

        Ok(())
    }

    /// Selects a folder, returning its message count.
    ///
    /// # Errors
    ///
    /// Fails if the folder does not exist or the store cannot connect.
    pub async fn select_folder(&mut self, name: &str) -> Result<u32> {
        self.store.select_folder(name).await
    }

    /// Selects `folder` and fetches the headers of up to `limit` messages
    /// matching `criteria` (`"ALL"` matches everything).
    ///
    /// Handles come back in server order, ascending by sequence number,
    /// and stay valid only while the folder selection is unchanged.
    ///
    /// # Errors
    ///
    /// Fails if the folder cannot be selected, the criteria are rejected,
    /// or a matched message cannot be fetched.
    pub async fn search_messages(
        &mut self,
        criteria: &str,
        folder: &str,
        limit: usize,
    ) -> Result<Vec<MessageHandle>> {
        self.store.select_folder(folder).await?;
        let hits = self.store.search(criteria).await?;

        let mut handles = Vec::with_capacity(hits.len().min(limit));
        for seq in hits.into_iter().take(limit) {
            handles.push(self.store.fetch_headers(seq).await?);
        }
        debug!(criteria, folder, count = handles.len(), "Search complete");
        Ok(handles)
    }

    /// Fetches the triage headers for one message in the selected folder.
    ///
    /// # Errors
    ///
    /// Fails if the message does not exist.
    pub async fn fetch_message(&mut self, seq: u32) -> Result<MessageHandle> {
        self.store.fetch_headers(seq).await
    }

    /// Moves a message from one folder to another.
    ///
    /// The sequence is select, copy, flag `\Deleted`, expunge. A failure
    /// at any step stops the sequence there; the returned error names the
    /// step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Move`] wrapping the step that failed.
    pub async fn move_message(&mut self, seq: u32, from: &str, to: &str) -> Result<()> {
        let step = |step: MoveStep| move |e: Error| Error::Move {
            step,
            source: Box::new(e),
        };

        self.store
            .select_folder(from)
            .await
            .map_err(step(MoveStep::Select))?;
        self.store
            .copy_message(seq, to)
            .await
            .map_err(step(MoveStep::Copy))?;
        self.store
            .mark_deleted(seq)
            .await
            .map_err(step(MoveStep::MarkDeleted))?;
        self.store
            .expunge()
            .await
            .map_err(step(MoveStep::Expunge))?;

        info!(seq, from, to, "Moved message");
        Ok(())
    }

    /// Moves a message to the folder mapped for a category.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::move_message`].
    pub async fn file_by_category(
        &mut self,
        seq: u32,
        from: &str,
        category: Category,
    ) -> Result<()> {
        let to = self.mapping.folder_for(category).to_string();
        self.move_message(seq, from, &to).await
    }

    /// Disconnects the store. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Propagates store disconnect failures.
    pub async fn disconnect(&mut self) -> Result<()> {
        self.store.disconnect().await
    }

    /// Gives access to the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
