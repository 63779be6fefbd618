//! `application/x-www-form-urlencoded` style encoding in UTF-8.
//!
//! `A-Z a-z 0-9 . - * _` pass through unchanged, space maps to `+`, and every
//! other byte of the UTF-8 form becomes `%XX`.

use seqkit_types::DecodeError;
use percent_encoding::percent_decode;
use url::form_urlencoded;

use crate::coalesce::coalesce_str;

#[must_use]
pub fn encode(input: &str) -> String {
    form_urlencoded::byte_serialize(input.as_bytes()).collect()
}

/// [`encode`] treating absent input as the empty string.
#[must_use]
pub fn encode_opt(input: Option<&str>) -> String {
    encode(coalesce_str(input))
}

/// Reverse [`encode`].
///
/// `+` decodes to a space. A `%` not followed by two hex digits is a
/// [`DecodeError`]. Byte runs that are not valid UTF-8 are replaced with
/// U+FFFD.
pub fn decode(input: &str) -> Result<String, DecodeError> {
    validate_escapes(input)?;
    let spaced = input.replace('+', " ");
    Ok(percent_decode(spaced.as_bytes())
        .decode_utf8_lossy()
        .into_owned())
}

/// [`decode`] treating absent input as the empty string.
pub fn decode_opt(input: Option<&str>) -> Result<String, DecodeError> {
    decode(coalesce_str(input))
}

/// Reject any `%` not followed by two hex digits.
fn validate_escapes(input: &str) -> Result<(), DecodeError> {
    let bytes = input.as_bytes();
    for (position, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let (Some(hi), Some(lo)) = (bytes.get(position + 1), bytes.get(position + 2)) else {
            return Err(DecodeError::TruncatedEscape { position });
        };
        if !(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()) {
            let end = (position + 3).min(bytes.len());
            let escape = String::from_utf8_lossy(&bytes[position..end]).into_owned();
            return Err(DecodeError::InvalidEscape { position, escape });
        }
    }
    Ok(())
}
