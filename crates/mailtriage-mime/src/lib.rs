//! # mailtriage-mime
//!
//! Header decoding for the mail triage engine: RFC 5322 header block
//! parsing with unfolding, plus Base64, Quoted-Printable, and RFC 2047
//! encoded-word decoding for header values.
//!
//! ```
//! use mailtriage_mime::{decoded_field, parse_header_block};
//!
//! let raw = b"Subject: =?utf-8?B?SMOpbGxv?=\r\nFrom: alice@example.com\r\n";
//! let fields = parse_header_block(raw);
//! assert_eq!(decoded_field(&fields, "Subject").as_deref(), Some("H\u{e9}llo"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod encoding;
mod error;
mod header;

pub use encoding::{decode_base64, decode_header_value, decode_quoted_printable, decode_rfc2047};
pub use error::{Error, Result};
pub use header::{HeaderField, decoded_field, parse_header_block};
