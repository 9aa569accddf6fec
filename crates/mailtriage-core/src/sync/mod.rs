//! Folder synchronization: mapping, store backends, and the synchronizer.

mod mapping;
mod store;
mod synchronizer;

pub use mapping::FolderMapping;
pub use store::{ImapStore, MailStore, MessageHandle};
pub use synchronizer::FolderSynchronizer;
