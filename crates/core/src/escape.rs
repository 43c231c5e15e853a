//! Percent-encoding rules for the individual URL components.
//!
//! Each component tolerates a different set of unescaped characters, so every
//! operation here takes the [`Encoding`] of the component it is working on.

use crate::error::UrlError;

const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";

/// The URL component a string belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Path,
    Host,
    Zone,
    UserPassword,
    QueryComponent,
    Fragment,
}

/// Reports whether `byte` has to be percent-escaped inside the given component.
pub fn should_escape(byte: u8, mode: Encoding) -> bool {
    if byte.is_ascii_alphanumeric() {
        return false;
    }

    if matches!(mode, Encoding::Host | Encoding::Zone)
        && matches!(
            byte,
            b'!' | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b':'
                | b'['
                | b']'
                | b'<'
                | b'>'
                | b'"'
        )
    {
        return false;
    }

    match byte {
        b'-' | b'_' | b'.' | b'~' => false,
        b'$' | b'&' | b'+' | b',' | b'/' | b':' | b';' | b'=' | b'?' | b'@' => match mode {
            Encoding::Path => byte == b'?',
            Encoding::UserPassword => matches!(byte, b'@' | b'/' | b'?' | b':'),
            Encoding::QueryComponent | Encoding::Host | Encoding::Zone => true,
            Encoding::Fragment => false,
        },
        b'!' | b'(' | b')' | b'*' if mode == Encoding::Fragment => false,
        _ => true,
    }
}

/// Percent-escapes every byte of `value` the component does not allow verbatim.
pub fn escape(value: &str, mode: Encoding) -> String {
    let mut escaped = String::with_capacity(value.len());

    for &byte in value.as_bytes() {
        if byte == b' ' && mode == Encoding::QueryComponent {
            escaped.push('+');
        } else if should_escape(byte, mode) {
            escaped.push('%');
            escaped.push(UPPER_HEX[usize::from(byte >> 4)] as char);
            escaped.push(UPPER_HEX[usize::from(byte & 0x0f)] as char);
        } else {
            // Only ASCII survives `should_escape`.
            escaped.push(byte as char);
        }
    }

    escaped
}

/// Decodes `%XX` sequences (and `+` for query components).
///
/// # Errors
///
/// Returns [`UrlError::InvalidEscape`] on a truncated or non-hex escape, and
/// [`UrlError::InvalidHostCharacter`] when a host contains a byte hosts may not carry.
pub fn unescape(value: &str, mode: Encoding) -> Result<String, UrlError> {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            b'%' => {
                if index + 2 >= bytes.len()
                    || !bytes[index + 1].is_ascii_hexdigit()
                    || !bytes[index + 2].is_ascii_hexdigit()
                {
                    let end = (index + 3).min(bytes.len());
                    return Err(UrlError::InvalidEscape(lossy(&bytes[index..end])));
                }

                let high = unhex(bytes[index + 1]);
                let byte = (high << 4) | unhex(bytes[index + 2]);
                let sequence = &bytes[index..index + 3];

                // Hosts may only percent-encode non-ASCII bytes, apart from the zone separator.
                if mode == Encoding::Host && high < 8 && sequence != b"%25" {
                    return Err(UrlError::InvalidEscape(lossy(sequence)));
                }
                if mode == Encoding::Zone
                    && sequence != b"%25"
                    && byte != b' '
                    && should_escape(byte, Encoding::Host)
                {
                    return Err(UrlError::InvalidEscape(lossy(sequence)));
                }

                decoded.push(byte);
                index += 3;
            }
            b'+' if mode == Encoding::QueryComponent => {
                decoded.push(b' ');
                index += 1;
            }
            byte => {
                if matches!(mode, Encoding::Host | Encoding::Zone)
                    && byte < 0x80
                    && should_escape(byte, mode)
                {
                    return Err(UrlError::InvalidHostCharacter(lossy(&[byte])));
                }
                decoded.push(byte);
                index += 1;
            }
        }
    }

    Ok(String::from_utf8_lossy(&decoded).into_owned())
}

/// Reports whether an already-escaped string only uses characters that are
/// legal in the component, so it can be emitted as-is.
pub fn valid_encoded(value: &str, mode: Encoding) -> bool {
    value.bytes().all(|byte| match byte {
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' | b':'
        | b'@' | b'[' | b']' | b'%' => true,
        _ => !should_escape(byte, mode),
    })
}

fn unhex(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
