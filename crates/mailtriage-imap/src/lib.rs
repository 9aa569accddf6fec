//! # mailtriage-imap
//!
//! A small async IMAP client covering the commands a mailbox triage engine
//! needs: LOGIN, LIST, CREATE, SELECT, SEARCH, header FETCH, STORE, COPY,
//! and EXPUNGE.
//!
//! ## Features
//!
//! - **Type-state connection management**: compile-time enforcement of valid
//!   state transitions (`NotAuthenticated` → `Authenticated` → `Selected`)
//! - **TLS via rustls**: secure connections without an OpenSSL dependency
//! - **Sans-I/O parser**: response parsing separated from network I/O
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailtriage_imap::{Client, Mailbox, connect};
//!
//! #[tokio::main]
//! async fn main() -> mailtriage_imap::Result<()> {
//!     let stream = connect("imap.example.com", 993, true).await?;
//!     let client = Client::from_stream(stream).await?;
//!     let client = client.login("user@example.com", "password").await?;
//!
//!     let (mut client, status) = client.select(&Mailbox::inbox()).await?;
//!     println!("{} messages", status.exists);
//!
//!     let unseen = client.search("UNSEEN").await?;
//!     println!("{} unseen", unseen.len());
//!
//!     client.logout().await
//! }
//! ```
//!
//! ## Modules
//!
//! - [`command`]: command builders and tag generation
//! - [`connection`]: transports, framing, and the type-state client
//! - [`parser`]: sans-I/O response parser
//! - [`types`]: flags, mailboxes, sequence sets

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod parser;
pub mod types;

pub use command::{Command, FetchItems, StoreAction, TagGenerator};
pub use connection::{
    Authenticated, Client, ImapStream, LoggedIn, NotAuthenticated, Selected, connect,
};
pub use error::{Error, Result};
pub use parser::{Response, ResponseParser, UntaggedResponse};
pub use types::{Flag, ListItem, Mailbox, MailboxStatus, SeqNum, SequenceSet, Status};
