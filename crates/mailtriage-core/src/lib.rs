//! # mailtriage-core
//!
//! Email triage and folder synchronization engine.
//!
//! This crate provides:
//! - **Triage classifier** - deterministic keyword rules that assign each
//!   message a category, an action, and a justification, with an optional
//!   delegate classifier that falls back to the rules
//! - **Folder synchronizer** - provisions the mapped folders on an IMAP
//!   server and files messages by category via copy, flag, and expunge
//! - **Account management** - session configuration with keyring-backed
//!   credential resolution
//! - **Known contacts** - the address list the urgency tiers consult

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod contacts;
mod error;
pub mod sync;
pub mod triage;

pub use account::credentials;
pub use account::{Account, CredentialError, CredentialResult, SessionConfig};
pub use contacts::KnownContacts;
pub use error::{Error, MoveStep, Result};
pub use sync::{FolderMapping, FolderSynchronizer, ImapStore, MailStore, MessageHandle};
pub use triage::{Action, Category, Classifier, DelegateBacked, Message, RuleBased, TriageResult};
