//! Lightweight IMAP response parser.
//!
//! Parses the response shapes the folder synchronizer actually receives:
//! tagged status lines, untagged EXISTS/RECENT/EXPUNGE counters, SEARCH
//! results, LIST lines, and FETCH responses carrying a header literal.
//! Anything else is preserved as [`UntaggedResponse::Other`] so callers can
//! skip it without failing.

use crate::types::{ListItem, Mailbox, SeqNum, Status};
use crate::{Error, Result};

/// A parsed server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Tagged completion response.
    Tagged {
        /// Command tag this response completes.
        tag: String,
        /// Status word.
        status: Status,
        /// Human-readable text.
        text: String,
    },
    /// Untagged (`*`) response.
    Untagged(UntaggedResponse),
    /// Continuation request (`+`).
    Continuation(String),
}

/// Untagged response data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntaggedResponse {
    /// Untagged status line (`* OK ...`, `* BYE ...`).
    Status {
        /// Status word.
        status: Status,
        /// Human-readable text.
        text: String,
    },
    /// Message count in the selected mailbox.
    Exists(u32),
    /// Recent message count.
    Recent(u32),
    /// A message was expunged.
    Expunge(SeqNum),
    /// SEARCH result sequence numbers, in server order.
    Search(Vec<SeqNum>),
    /// LIST response line.
    List(ListItem),
    /// FETCH response; `section` holds the raw body-section literal
    /// (header fields for this client).
    Fetch {
        /// Message sequence number.
        seq: SeqNum,
        /// Raw section payload.
        section: Vec<u8>,
    },
    /// Any response this parser does not interpret.
    Other(String),
}

/// Parser for complete response frames as produced by the framed stream.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses a single response frame.
    ///
    /// The frame must contain the complete response including any embedded
    /// literal data, as read by `FramedStream::read_response`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] on frames that cannot be interpreted as
    /// any IMAP response.
    pub fn parse(bytes: &[u8]) -> Result<Response> {
        let first_line = first_line(bytes);
        let line = String::from_utf8_lossy(trim_crlf(first_line)).into_owned();

        if let Some(rest) = line.strip_prefix('+') {
            return Ok(Response::Continuation(rest.trim_start().to_string()));
        }

        if let Some(rest) = line.strip_prefix("* ") {
            return parse_untagged(rest, bytes).map(Response::Untagged);
        }

        parse_tagged(&line)
    }
}

fn parse_tagged(line: &str) -> Result<Response> {
    let mut parts = line.splitn(3, ' ');
    let tag = parts
        .next()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Protocol("empty response line".to_string()))?;
    let status = parts
        .next()
        .and_then(Status::parse)
        .ok_or_else(|| Error::Protocol(format!("missing status word: {line}")))?;
    let text = parts.next().unwrap_or_default().to_string();

    Ok(Response::Tagged {
        tag: tag.to_string(),
        status,
        text,
    })
}

fn parse_untagged(rest: &str, full: &[u8]) -> Result<UntaggedResponse> {
    let mut parts = rest.splitn(2, ' ');
    let first = parts.next().unwrap_or_default();
    let remainder = parts.next().unwrap_or_default();

    // Numeric-prefixed responses: EXISTS, RECENT, EXPUNGE, FETCH.
    if let Ok(n) = first.parse::<u32>() {
        let mut kw_parts = remainder.splitn(2, ' ');
        let keyword = kw_parts.next().unwrap_or_default().to_ascii_uppercase();
        return match keyword.as_str() {
            "EXISTS" => Ok(UntaggedResponse::Exists(n)),
            "RECENT" => Ok(UntaggedResponse::Recent(n)),
            "EXPUNGE" => SeqNum::new(n)
                .map(UntaggedResponse::Expunge)
                .ok_or_else(|| Error::Protocol("EXPUNGE with sequence number 0".to_string())),
            "FETCH" => parse_fetch(n, full),
            _ => Ok(UntaggedResponse::Other(rest.to_string())),
        };
    }

    if let Some(status) = Status::parse(first) {
        return Ok(UntaggedResponse::Status {
            status,
            text: remainder.to_string(),
        });
    }

    match first.to_ascii_uppercase().as_str() {
        "SEARCH" => {
            let ids = remainder
                .split_whitespace()
                .filter_map(|s| s.parse().ok())
                .collect();
            Ok(UntaggedResponse::Search(ids))
        }
        "LIST" => parse_list(remainder, full),
        _ => Ok(UntaggedResponse::Other(rest.to_string())),
    }
}

fn parse_fetch(seq: u32, full: &[u8]) -> Result<UntaggedResponse> {
    let seq =
        SeqNum::new(seq).ok_or_else(|| Error::Protocol("FETCH with sequence number 0".to_string()))?;

    // The header payload arrives as a literal; everything before it is the
    // attribute list, which this client does not need beyond locating the data.
    let section = match find_literal(full) {
        Some((start, len)) => full.get(start..start + len).unwrap_or_default().to_vec(),
        None => Vec::new(),
    };

    Ok(UntaggedResponse::Fetch { seq, section })
}

fn parse_list(rest: &str, full: &[u8]) -> Result<UntaggedResponse> {
    let open = rest
        .find('(')
        .ok_or_else(|| Error::Protocol(format!("LIST without attribute list: {rest}")))?;
    let close = rest[open..]
        .find(')')
        .map(|i| open + i)
        .ok_or_else(|| Error::Protocol(format!("LIST with unterminated attributes: {rest}")))?;

    let attributes: Vec<String> = rest[open + 1..close]
        .split_whitespace()
        .map(ToString::to_string)
        .collect();

    let after = rest[close + 1..].trim_start();
    let (delimiter, name_part) = parse_delimiter(after);

    let mailbox = if name_part.starts_with('{') {
        // Literal mailbox name; the framed stream appended the raw bytes.
        let (start, len) = find_literal(full)
            .ok_or_else(|| Error::Protocol("LIST literal without data".to_string()))?;
        let raw = full.get(start..start + len).unwrap_or_default();
        String::from_utf8_lossy(raw).into_owned()
    } else {
        unquote(name_part)
    };

    Ok(UntaggedResponse::List(ListItem {
        attributes,
        delimiter,
        mailbox: Mailbox::new(mailbox),
    }))
}

/// Splits a LIST tail into its delimiter and the remaining mailbox text.
fn parse_delimiter(s: &str) -> (Option<char>, &str) {
    if let Some(rest) = s.strip_prefix("NIL") {
        return (None, rest.trim_start());
    }
    if s.starts_with('"') {
        // Quoted single-character delimiter, e.g. "/" or "."
        if let Some(end) = s[1..].find('"') {
            let delim = s[1..=end].chars().next();
            return (delim, s[end + 2..].trim_start());
        }
    }
    (None, s)
}

/// Removes surrounding quotes and unescapes a quoted string, if quoted.
fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        let inner = &s[1..s.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut escaped = false;
        for c in inner.chars() {
            if escaped {
                out.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else {
                out.push(c);
            }
        }
        out
    } else {
        s.to_string()
    }
}

/// Returns the first CRLF-terminated line of a frame (including CRLF).
fn first_line(bytes: &[u8]) -> &[u8] {
    bytes
        .windows(2)
        .position(|w| w == b"\r\n")
        .map_or(bytes, |pos| &bytes[..pos + 2])
}

fn trim_crlf(bytes: &[u8]) -> &[u8] {
    bytes.strip_suffix(b"\r\n").unwrap_or(bytes)
}

/// Locates the first literal in a frame.
///
/// Returns `(data_start, length)` where `data_start` indexes just past the
/// `{n}\r\n` marker.
fn find_literal(bytes: &[u8]) -> Option<(usize, usize)> {
    let open = bytes.iter().position(|&b| b == b'{')?;
    let close = bytes[open..].iter().position(|&b| b == b'}')? + open;
    let len: usize = std::str::from_utf8(&bytes[open + 1..close])
        .ok()?
        .trim_end_matches('+')
        .parse()
        .ok()?;
    // The literal data begins after the CRLF that follows the marker.
    if bytes.get(close + 1..close + 3)? == b"\r\n" {
        Some((close + 3, len))
    } else {
        None
    }
}
