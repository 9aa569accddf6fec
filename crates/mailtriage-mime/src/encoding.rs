//! Transfer-encoding decoders.
//!
//! Covers the encodings that show up in message headers: Base64,
//! Quoted-Printable, and RFC 2047 encoded words.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

/// Decodes Base64 data.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD.decode(data).map_err(Into::into)
}

/// Decodes Quoted-Printable text (RFC 2045).
///
/// # Errors
///
/// Returns an error on truncated or non-hex escape sequences, or if the
/// decoded bytes are not UTF-8.
pub fn decode_quoted_printable(text: &str) -> Result<String> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '=' {
            bytes.push(ch as u8);
            continue;
        }

        // Soft line break: "=\r\n" or "=\n".
        if chars.peek() == Some(&'\r') {
            chars.next();
            if chars.peek() == Some(&'\n') {
                chars.next();
                continue;
            }
            return Err(Error::InvalidEncoding("bare CR after '='".to_string()));
        }
        if chars.peek() == Some(&'\n') {
            chars.next();
            continue;
        }

        let hex: String = chars.by_ref().take(2).collect();
        if hex.len() != 2 {
            return Err(Error::InvalidEncoding(
                "incomplete escape sequence".to_string(),
            ));
        }
        let byte = u8::from_str_radix(&hex, 16)
            .map_err(|e| Error::InvalidEncoding(format!("invalid hex escape: {e}")))?;
        bytes.push(byte);
    }

    String::from_utf8(bytes).map_err(Into::into)
}

/// Decodes a single RFC 2047 encoded word (`=?charset?encoding?text?=`).
///
/// Input that is not in encoded-word form is returned unchanged.
///
/// # Errors
///
/// Returns an error on malformed words, unknown encodings, or unsupported
/// charsets.
pub fn decode_rfc2047(text: &str) -> Result<String> {
    if !text.starts_with("=?") || !text.ends_with("?=") {
        return Ok(text.to_string());
    }

    let inner = &text[2..text.len() - 2];
    let parts: Vec<&str> = inner.splitn(3, '?').collect();
    let [charset, encoding, payload] = parts.as_slice() else {
        return Err(Error::InvalidEncoding("malformed encoded word".to_string()));
    };

    let bytes = match encoding.to_ascii_uppercase().as_str() {
        "B" => decode_base64(payload)?,
        // Q encoding uses '_' for space.
        "Q" => return decode_charset(charset, decode_q_bytes(payload)?),
        other => {
            return Err(Error::InvalidEncoding(format!("unknown encoding: {other}")));
        }
    };

    decode_charset(charset, bytes)
}

fn decode_q_bytes(payload: &str) -> Result<Vec<u8>> {
    let spaced = payload.replace('_', " ");
    let mut bytes = Vec::with_capacity(spaced.len());
    let mut chars = spaced.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '=' {
            bytes.push(ch as u8);
            continue;
        }
        let hex: String = chars.by_ref().take(2).collect();
        if hex.len() != 2 {
            return Err(Error::InvalidEncoding(
                "incomplete escape sequence".to_string(),
            ));
        }
        let byte = u8::from_str_radix(&hex, 16)
            .map_err(|e| Error::InvalidEncoding(format!("invalid hex escape: {e}")))?;
        bytes.push(byte);
    }

    Ok(bytes)
}

fn decode_charset(charset: &str, bytes: Vec<u8>) -> Result<String> {
    if charset.eq_ignore_ascii_case("utf-8") || charset.eq_ignore_ascii_case("us-ascii") {
        return String::from_utf8(bytes).map_err(Into::into);
    }
    if charset.eq_ignore_ascii_case("iso-8859-1") || charset.eq_ignore_ascii_case("latin1") {
        return Ok(bytes.into_iter().map(char::from).collect());
    }
    Err(Error::InvalidEncoding(format!(
        "unsupported charset: {charset}"
    )))
}

/// Decodes a full header value that may mix plain text with RFC 2047
/// encoded words.
///
/// Whitespace between two adjacent encoded words is dropped per RFC 2047.
/// Words that fail to decode are passed through verbatim, so this function
/// is total over arbitrary input.
#[must_use]
pub fn decode_header_value(value: &str) -> String {
    let mut out = String::new();
    let mut rest = value;
    let mut last_was_encoded = false;

    while let Some(start) = rest.find("=?") {
        let prefix = &rest[..start];

        let Some((word, tail)) = split_encoded_word(&rest[start..]) else {
            out.push_str(prefix);
            out.push_str("=?");
            rest = &rest[start + 2..];
            last_was_encoded = false;
            continue;
        };

        let separator_only = prefix.chars().all(char::is_whitespace);
        if !(last_was_encoded && separator_only) {
            out.push_str(prefix);
        }

        match decode_rfc2047(word) {
            Ok(decoded) => out.push_str(&decoded),
            Err(_) => out.push_str(word),
        }
        last_was_encoded = true;
        rest = tail;
    }

    out.push_str(rest);
    out
}

/// Splits off one complete encoded word from a string starting with `=?`.
fn split_encoded_word(s: &str) -> Option<(&str, &str)> {
    let q1 = 2 + s.get(2..)?.find('?')?;
    let q2 = q1 + 1 + s.get(q1 + 1..)?.find('?')?;
    let end = q2 + 1 + s.get(q2 + 1..)?.find("?=")?;
    Some((&s[..end + 2], &s[end + 2..]))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base64_decode() {
        assert_eq!(
            decode_base64("SGVsbG8sIFdvcmxkIQ==").unwrap(),
            b"Hello, World!"
        );
        assert!(decode_base64("not base64!").is_err());
    }

    #[test]
    fn test_quoted_printable_decode() {
        assert_eq!(decode_quoted_printable("Hello").unwrap(), "Hello");
        assert_eq!(decode_quoted_printable("H=C3=A9llo").unwrap(), "Héllo");
    }

    #[test]
    fn test_quoted_printable_soft_break() {
        assert_eq!(decode_quoted_printable("Hello=\r\nWorld").unwrap(), "HelloWorld");
    }

    #[test]
    fn test_quoted_printable_truncated_escape() {
        assert!(decode_quoted_printable("bad=A").is_err());
    }

    #[test]
    fn test_rfc2047_base64_word() {
        assert_eq!(decode_rfc2047("=?utf-8?B?SMOpbGxv?=").unwrap(), "Héllo");
    }

    #[test]
    fn test_rfc2047_q_word() {
        assert_eq!(decode_rfc2047("=?utf-8?Q?H=C3=A9llo?=").unwrap(), "Héllo");
        assert_eq!(decode_rfc2047("=?utf-8?Q?a_b?=").unwrap(), "a b");
    }

    #[test]
    fn test_rfc2047_latin1() {
        assert_eq!(decode_rfc2047("=?iso-8859-1?Q?caf=E9?=").unwrap(), "café");
    }

    #[test]
    fn test_rfc2047_plain_passthrough() {
        assert_eq!(decode_rfc2047("plain subject").unwrap(), "plain subject");
    }

    #[test]
    fn test_header_value_mixed() {
        assert_eq!(
            decode_header_value("Re: =?utf-8?B?SMOpbGxv?= there"),
            "Re: Héllo there"
        );
    }

    #[test]
    fn test_header_value_adjacent_words() {
        // Whitespace between encoded words is not significant.
        assert_eq!(
            decode_header_value("=?utf-8?Q?Hello?= =?utf-8?Q?_World?="),
            "Hello World"
        );
    }

    #[test]
    fn test_header_value_bad_word_passthrough() {
        assert_eq!(
            decode_header_value("=?bogus-charset?B?????=!"),
            "=?bogus-charset?B?????=!"
        );
    }

    proptest! {
        #[test]
        fn header_value_decoding_never_panics(s in ".*") {
            let _ = decode_header_value(&s);
        }
    }
}
