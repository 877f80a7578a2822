use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::document::ConfigDocument;
use crate::error::ParseError;
use crate::parsing::{DocumentBuilder, InputCursor};

const READER_ORIGIN: &str = "<reader>";
const STRING_ORIGIN: &str = "<string>";

/// Parse any byte stream.
pub fn parse<R: Read>(reader: R) -> Result<ConfigDocument, ParseError> {
    parse_buffered(BufReader::new(reader))
}

/// Parse an already buffered stream without wrapping it again.
pub fn parse_buffered<R: BufRead>(reader: R) -> Result<ConfigDocument, ParseError> {
    parse_named(reader, READER_ORIGIN)
}

pub fn parse_str(input: &str) -> Result<ConfigDocument, ParseError> {
    parse_named(input.as_bytes(), STRING_ORIGIN)
}

/// Parse the file at `path`.
///
/// The file handle lives only for the duration of this call. Failing to open
/// it is reported before any line is classified.
pub fn parse_path<P: AsRef<Path>>(path: P) -> Result<ConfigDocument, ParseError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|source| ParseError::IoFailure {
        origin: origin.clone(),
        source,
    })?;
    parse_named(BufReader::new(file), origin)
}

fn parse_named<R: BufRead>(
    reader: R,
    origin: impl Into<String>,
) -> Result<ConfigDocument, ParseError> {
    let mut cursor = InputCursor::new(reader, origin);
    let result = DocumentBuilder::new().run(&mut cursor);
    if let Ok(doc) = &result {
        log::debug!(
            "parsed {} entries from {} ({} lines)",
            doc.len(),
            cursor.origin(),
            cursor.line_number()
        );
    }
    result
}
