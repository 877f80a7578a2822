use std::io::BufRead;

use crate::error::ParseError;

use super::{classify::trim_newlines, cursor::InputCursor};

/// Result of assembling a multi-character value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiCharValue {
    pub value: String,
    /// Text after the first `count` characters of the fragment, to be
    /// classified as the next logical line.
    pub leftover: Option<String>,
}

/// Completes a `key:<N>L=` value by pulling `count - 1` further raw lines.
pub fn read_multi_line<R: BufRead>(
    cursor: &mut InputCursor<R>,
    key: &str,
    count: usize,
    first_fragment: &str,
) -> Result<String, ParseError> {
    let mut value = String::from(first_fragment);
    if count > 1 {
        let rest = cursor
            .next_lines(count - 1)
            .map_err(|e| ParseError::from_cursor(e, key, cursor.origin()))?;
        value.push('\n');
        value.push_str(&rest);
    }
    Ok(trim_newlines(&value).to_string())
}

/// Completes a `key:<N>C=` value.
///
/// The newline between the fragment and the continuation counts toward
/// `count`. A fragment longer than `count` is cut and its tail handed back.
pub fn read_multi_char<R: BufRead>(
    cursor: &mut InputCursor<R>,
    key: &str,
    count: usize,
    first_fragment: &str,
) -> Result<MultiCharValue, ParseError> {
    let len = first_fragment.chars().count();

    if count > len {
        let rest = cursor
            .next_chars(count - len - 1)
            .map_err(|e| ParseError::from_cursor(e, key, cursor.origin()))?;
        let value = format!("{first_fragment}\n{rest}");
        return Ok(MultiCharValue {
            value: trim_newlines(&value).to_string(),
            leftover: None,
        });
    }

    if count == len {
        return Ok(MultiCharValue {
            value: trim_newlines(first_fragment).to_string(),
            leftover: None,
        });
    }

    // count < len, so the index exists.
    let split = first_fragment
        .char_indices()
        .nth(count)
        .map_or(first_fragment.len(), |(idx, _)| idx);
    let (head, tail) = first_fragment.split_at(split);
    Ok(MultiCharValue {
        value: head.to_string(),
        leftover: Some(tail.to_string()),
    })
}
