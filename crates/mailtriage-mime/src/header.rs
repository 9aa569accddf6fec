//! Header block parsing.
//!
//! Works on the raw `HEADER.FIELDS` payload an IMAP fetch returns: a block
//! of `Name: value` lines with RFC 5322 folding.

use crate::encoding::decode_header_value;

/// A parsed header field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    /// Field name as it appeared, e.g. `Subject`.
    pub name: String,
    /// Unfolded raw value, before any RFC 2047 decoding.
    pub value: String,
}

/// Parses a raw header block into fields, unfolding continuation lines.
///
/// Lines without a colon and empty lines are skipped. Bytes that are not
/// UTF-8 are replaced rather than rejected, since header parsing feeds a
/// classifier that should see every message.
#[must_use]
pub fn parse_header_block(raw: &[u8]) -> Vec<HeaderField> {
    let text = String::from_utf8_lossy(raw);
    let mut fields: Vec<HeaderField> = Vec::new();

    for line in text.split("\r\n").flat_map(|l| l.split('\n')) {
        if line.is_empty() {
            continue;
        }

        // Folded continuation of the previous field.
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(last) = fields.last_mut() {
                last.value.push(' ');
                last.value.push_str(line.trim_start());
            }
            continue;
        }

        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        fields.push(HeaderField {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
        });
    }

    fields
}

/// Returns the decoded value of the first field with the given name,
/// compared case-insensitively.
#[must_use]
pub fn decoded_field(fields: &[HeaderField], name: &str) -> Option<String> {
    fields
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(name))
        .map(|f| decode_header_value(&f.value))
}
