//! Command serialization helpers.

use crate::types::{Flag, Mailbox};

/// Writes an astring (atom or quoted string).
pub fn write_astring(buf: &mut Vec<u8>, s: &str) {
    if s.is_empty() || s.bytes().any(needs_quoting) {
        buf.push(b'"');
        for b in s.bytes() {
            if b == b'"' || b == b'\\' {
                buf.push(b'\\');
            }
            buf.push(b);
        }
        buf.push(b'"');
    } else {
        buf.extend_from_slice(s.as_bytes());
    }
}

/// Writes a mailbox name.
pub fn write_mailbox(buf: &mut Vec<u8>, mailbox: &Mailbox) {
    write_astring(buf, mailbox.as_str());
}

/// Returns true if the byte needs quoting.
const fn needs_quoting(b: u8) -> bool {
    matches!(b, b' ' | b'"' | b'\\' | b'(' | b')' | b'{' | b'%' | b'*') || b < 0x20 || b == 0x7F
}

/// Writes a parenthesized flag list.
pub fn write_flag_list(buf: &mut Vec<u8>, flags: &[Flag]) {
    buf.push(b'(');
    for (i, flag) in flags.iter().enumerate() {
        if i > 0 {
            buf.push(b' ');
        }
        buf.extend_from_slice(flag.as_str().as_bytes());
    }
    buf.push(b')');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_astring_atom() {
        let mut buf = Vec::new();
        write_astring(&mut buf, "INBOX");
        assert_eq!(buf, b"INBOX");
    }

    #[test]
    fn test_astring_quoted() {
        let mut buf = Vec::new();
        write_astring(&mut buf, "My Folder");
        assert_eq!(buf, b"\"My Folder\"");
    }

    #[test]
    fn test_astring_escapes() {
        let mut buf = Vec::new();
        write_astring(&mut buf, "a\"b");
        assert_eq!(buf, b"\"a\\\"b\"");
    }

    #[test]
    fn test_astring_empty() {
        let mut buf = Vec::new();
        write_astring(&mut buf, "");
        assert_eq!(buf, b"\"\"");
    }

    #[test]
    fn test_flag_list() {
        let mut buf = Vec::new();
        write_flag_list(&mut buf, &[Flag::Deleted, Flag::Seen]);
        assert_eq!(buf, b"(\\Deleted \\Seen)");
    }
}
