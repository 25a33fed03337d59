//! Codepoint sequence decoding.
//!
//! A codepoint sequence is one or more hexadecimal groups joined by a
//! separator: `_` in Noto file names (`emoji_u0031_fe0f.svg`), `-` in the
//! emoji feed (`"1f468-200d-1f469"`). Decoding is a pure function of the
//! sequence and the separator.

use crate::error::{DecodeError, DecodeResult};

/// Separator between groups in Noto icon file names.
pub const FILE_SEPARATOR: char = '_';

/// Separator between groups in feed records.
pub const FEED_SEPARATOR: char = '-';

/// Parse every group of `sequence` into its numeric codepoint, in order.
///
/// Fails on the first group that is empty, contains anything other than hex
/// digits, or names a value outside the Unicode scalar range.
pub fn decode_codepoints(sequence: &str, separator: char) -> DecodeResult<Vec<u32>> {
    sequence
        .split(separator)
        .map(|group| parse_group(sequence, group))
        .collect()
}

/// Decode `sequence` into the text it spells.
///
/// Groups are concatenated in order, so compound sequences (ZWJ joins,
/// modifiers, keycaps) come out as the plain run of their characters.
pub fn decode_sequence(sequence: &str, separator: char) -> DecodeResult<String> {
    decode_codepoints(sequence, separator)?
        .into_iter()
        .map(|value| {
            char::from_u32(value).ok_or_else(|| DecodeError::InvalidScalar {
                sequence: sequence.to_string(),
                value,
            })
        })
        .collect()
}

/// Extract the codepoint part of a `<prefix><sequence><extension>` file name.
pub fn sequence_from_name<'a>(
    name: &'a str,
    prefix: &str,
    extension: &str,
) -> DecodeResult<&'a str> {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(extension))
        .ok_or_else(|| DecodeError::UnexpectedName {
            name: name.to_string(),
            prefix: prefix.to_string(),
            extension: extension.to_string(),
        })
}

fn parse_group(sequence: &str, group: &str) -> DecodeResult<u32> {
    let invalid = || DecodeError::InvalidHex {
        sequence: sequence.to_string(),
        group: group.to_string(),
    };

    // from_str_radix tolerates a leading '+', which is not a hex digit.
    if group.is_empty() || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(group, 16).map_err(|_| invalid())?;
    if char::from_u32(value).is_none() {
        return Err(DecodeError::InvalidScalar {
            sequence: sequence.to_string(),
            value,
        });
    }
    Ok(value)
}
