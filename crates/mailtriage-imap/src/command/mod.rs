//! IMAP command builder.
//!
//! This module provides types and serialization for the commands the folder
//! synchronizer issues: authentication, folder management, search, header
//! fetch, flag store, copy, and expunge.

mod serialize;
mod tag_generator;

use crate::types::{Flag, Mailbox, SequenceSet};

pub use tag_generator::TagGenerator;

use serialize::{write_astring, write_flag_list, write_mailbox};

/// Items requested by a FETCH command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchItems {
    /// FAST macro (flags, internal date, size).
    Fast,
    /// Specific header fields, fetched with BODY.PEEK so the message is not
    /// marked as read.
    HeaderFields(Vec<String>),
}

/// STORE flag modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Add flags (+FLAGS).
    AddFlags(Vec<Flag>),
    /// Remove flags (-FLAGS).
    RemoveFlags(Vec<Flag>),
}

/// IMAP command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// NOOP command.
    Noop,
    /// LOGOUT command.
    Logout,
    /// LOGIN command.
    Login {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
    /// LIST command.
    List {
        /// Reference name.
        reference: String,
        /// Mailbox pattern.
        pattern: String,
    },
    /// CREATE command.
    Create {
        /// Mailbox to create.
        mailbox: Mailbox,
    },
    /// SELECT command.
    Select {
        /// Mailbox to select.
        mailbox: Mailbox,
    },
    /// CLOSE command.
    Close,
    /// EXPUNGE command.
    Expunge,
    /// SEARCH command with a raw criteria string (e.g. "ALL", "UNSEEN").
    Search {
        /// Search criteria in the standard IMAP query grammar.
        criteria: String,
    },
    /// FETCH command.
    Fetch {
        /// Sequence set.
        sequence: SequenceSet,
        /// Items to fetch.
        items: FetchItems,
    },
    /// STORE command.
    Store {
        /// Sequence set.
        sequence: SequenceSet,
        /// Store action.
        action: StoreAction,
        /// Silent mode (no FETCH response).
        silent: bool,
    },
    /// COPY command.
    Copy {
        /// Sequence set.
        sequence: SequenceSet,
        /// Target mailbox.
        mailbox: Mailbox,
    },
}

impl Command {
    /// Serializes the command to bytes with the given tag.
    #[must_use]
    pub fn serialize(&self, tag: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(tag.as_bytes());
        buf.push(b' ');

        match self {
            Self::Noop => buf.extend_from_slice(b"NOOP"),
            Self::Logout => buf.extend_from_slice(b"LOGOUT"),

            Self::Login { username, password } => {
                buf.extend_from_slice(b"LOGIN ");
                write_astring(&mut buf, username);
                buf.push(b' ');
                write_astring(&mut buf, password);
            }

            Self::List { reference, pattern } => {
                buf.extend_from_slice(b"LIST ");
                write_astring(&mut buf, reference);
                buf.push(b' ');
                write_astring(&mut buf, pattern);
            }

            Self::Create { mailbox } => {
                buf.extend_from_slice(b"CREATE ");
                write_mailbox(&mut buf, mailbox);
            }

            Self::Select { mailbox } => {
                buf.extend_from_slice(b"SELECT ");
                write_mailbox(&mut buf, mailbox);
            }

            Self::Close => buf.extend_from_slice(b"CLOSE"),
            Self::Expunge => buf.extend_from_slice(b"EXPUNGE"),

            Self::Search { criteria } => {
                buf.extend_from_slice(b"SEARCH ");
                buf.extend_from_slice(criteria.as_bytes());
            }

            Self::Fetch { sequence, items } => {
                buf.extend_from_slice(b"FETCH ");
                buf.extend_from_slice(sequence.to_string().as_bytes());
                buf.push(b' ');
                match items {
                    FetchItems::Fast => buf.extend_from_slice(b"FAST"),
                    FetchItems::HeaderFields(fields) => {
                        buf.extend_from_slice(b"(BODY.PEEK[HEADER.FIELDS (");
                        for (i, field) in fields.iter().enumerate() {
                            if i > 0 {
                                buf.push(b' ');
                            }
                            buf.extend_from_slice(field.to_uppercase().as_bytes());
                        }
                        buf.extend_from_slice(b")])");
                    }
                }
            }

            Self::Store {
                sequence,
                action,
                silent,
            } => {
                buf.extend_from_slice(b"STORE ");
                buf.extend_from_slice(sequence.to_string().as_bytes());
                buf.push(b' ');
                let (prefix, flags) = match action {
                    StoreAction::AddFlags(f) => ("+FLAGS", f),
                    StoreAction::RemoveFlags(f) => ("-FLAGS", f),
                };
                buf.extend_from_slice(prefix.as_bytes());
                if *silent {
                    buf.extend_from_slice(b".SILENT");
                }
                buf.push(b' ');
                write_flag_list(&mut buf, flags);
            }

            Self::Copy { sequence, mailbox } => {
                buf.extend_from_slice(b"COPY ");
                buf.extend_from_slice(sequence.to_string().as_bytes());
                buf.push(b' ');
                write_mailbox(&mut buf, mailbox);
            }
        }

        buf.extend_from_slice(b"\r\n");
        buf
    }
}
