use std::io::BufRead;

use crate::{document::ConfigDocument, error::ParseError};

use super::{
    classify::{LineClassifier, LineKind},
    continuation::{self, MultiCharValue},
    cursor::InputCursor,
};

/// Drives classification over a cursor and collects the resulting entries.
pub struct DocumentBuilder {
    classifier: LineClassifier,
    document: ConfigDocument,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier,
            document: ConfigDocument::new(),
        }
    }

    /// Consumes lines until the stream (and any injected line) is exhausted.
    ///
    /// End of stream between lines ends the parse normally. End of stream
    /// inside a continuation is a `TruncatedInput` error and nothing is returned.
    pub fn run<R: BufRead>(
        mut self,
        cursor: &mut InputCursor<R>,
    ) -> Result<ConfigDocument, ParseError> {
        while let Some(line) = cursor
            .next_line()
            .map_err(|e| ParseError::from_cursor(e, "", cursor.origin()))?
        {
            self.push(cursor, &line)?;
        }
        Ok(self.document)
    }

    fn push<R: BufRead>(
        &mut self,
        cursor: &mut InputCursor<R>,
        line: &str,
    ) -> Result<(), ParseError> {
        let kind = self.classifier.classify(line);
        log::trace!("line {}: {kind:?}", cursor.line_number());

        match kind {
            LineKind::Comment | LineKind::Blank => {}
            LineKind::Unrecognized => {
                log::debug!(
                    "{}:{}: skipping unrecognized line {:?}",
                    cursor.origin(),
                    cursor.line_number(),
                    line.trim_end()
                );
            }
            LineKind::MultiLineAssign {
                key,
                count,
                first_fragment,
            } => {
                let value = continuation::read_multi_line(cursor, key, count, first_fragment)?;
                self.store(key, value);
            }
            LineKind::MultiCharAssign {
                key,
                count,
                first_fragment,
            } => {
                let MultiCharValue { value, leftover } =
                    continuation::read_multi_char(cursor, key, count, first_fragment)?;
                self.store(key, value);
                if let Some(rest) = leftover {
                    cursor.inject_line(rest);
                }
            }
            LineKind::RawAssign { key, value } | LineKind::SimpleAssign { key, value } => {
                self.store(key, value.to_string());
            }
        }
        Ok(())
    }

    fn store(&mut self, key: &str, value: String) {
        log::debug!("set {key} ({} chars)", value.chars().count());
        if self.document.insert(key, value).is_some() {
            log::debug!("{key} reassigned, keeping the later value");
        }
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
