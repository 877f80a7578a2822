use std::io::BufRead;

use crate::error::ContinuationUnit;

#[derive(Debug, thiserror::Error)]
pub enum CursorError {
    #[error("input ended after {available} of {requested} {unit}")]
    Exhausted {
        unit: ContinuationUnit,
        requested: usize,
        available: usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A logical position over a line-oriented input stream.
///
/// Supports line reads, character reads that may stop in the middle of a
/// physical line, and injecting a synthetic line that is handed out before
/// anything else is read from the stream.
pub struct InputCursor<R> {
    reader: R,
    origin: String,
    /// Unconsumed tail of the last physical line read from `reader`.
    pending: String,
    /// Line handed out by the next `next_line` call, ahead of the stream.
    injected: Option<String>,
    lines_read: usize,
}

impl<R: BufRead> InputCursor<R> {
    /// Creates a cursor over `reader`. `origin` names the input in errors.
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader,
            origin: origin.into(),
            pending: String::new(),
            injected: None,
            lines_read: 0,
        }
    }

    /// Human readable name of the underlying input (path or `<reader>`).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Number of physical lines pulled from the stream so far.
    pub fn line_number(&self) -> usize {
        self.lines_read
    }

    /// Returns the next logical line, keeping its trailing newline.
    ///
    /// An injected line wins over the stream. After a character read that
    /// stopped mid-line, the rest of that physical line comes next.
    pub fn next_line(&mut self) -> Result<Option<String>, CursorError> {
        if let Some(line) = self.injected.take() {
            return Ok(Some(line));
        }
        self.physical_line()
    }

    /// Reads `n` raw lines and concatenates them, newlines included.
    pub fn next_lines(&mut self, n: usize) -> Result<String, CursorError> {
        let mut out = String::new();
        let mut taken = 0;
        while taken < n {
            match self.physical_line()? {
                Some(line) => out.push_str(&line),
                None => {
                    return Err(CursorError::Exhausted {
                        unit: ContinuationUnit::Lines,
                        requested: n,
                        available: taken,
                    });
                }
            }
            taken += 1;
        }
        Ok(out)
    }

    /// Reads exactly `n` characters, crossing physical line boundaries.
    pub fn next_chars(&mut self, n: usize) -> Result<String, CursorError> {
        let mut out = String::new();
        let mut taken = 0;
        while taken < n {
            if self.pending.is_empty() && !self.fill()? {
                return Err(CursorError::Exhausted {
                    unit: ContinuationUnit::Chars,
                    requested: n,
                    available: taken,
                });
            }

            let want = n - taken;
            let (split, count) = match self.pending.char_indices().nth(want) {
                Some((idx, _)) => (idx, want),
                None => (self.pending.len(), self.pending.chars().count()),
            };
            out.extend(self.pending.drain(..split));
            taken += count;
        }
        Ok(out)
    }

    /// Makes `line` the next logical line without touching the stream.
    pub fn inject_line(&mut self, line: impl Into<String>) {
        self.injected = Some(line.into());
    }

    fn physical_line(&mut self) -> Result<Option<String>, CursorError> {
        if self.pending.is_empty() && !self.fill()? {
            return Ok(None);
        }
        Ok(Some(std::mem::take(&mut self.pending)))
    }

    /// Reads the next physical line into `pending`. Returns false at end of stream.
    ///
    /// A `\r\n` terminator is normalized to `\n`, so counts see one newline char.
    fn fill(&mut self) -> Result<bool, CursorError> {
        debug_assert!(self.pending.is_empty());
        let n = self.reader.read_line(&mut self.pending)?;
        if n == 0 {
            return Ok(false);
        }
        if self.pending.ends_with("\r\n") {
            let len = self.pending.len();
            self.pending.replace_range(len - 2.., "\n");
        }
        self.lines_read += 1;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(s: &str) -> InputCursor<&[u8]> {
        InputCursor::new(s.as_bytes(), "<test>")
    }

    #[test]
    fn next_line_keeps_newlines() {
        let mut cur = cursor("a=1\nb=2");
        assert_eq!(cur.next_line().unwrap().as_deref(), Some("a=1\n"));
        assert_eq!(cur.next_line().unwrap().as_deref(), Some("b=2"));
        assert_eq!(cur.next_line().unwrap(), None);
        assert_eq!(cur.line_number(), 2);
    }

    #[test]
    fn empty_input_has_no_lines() {
        let mut cur = cursor("");
        assert_eq!(cur.next_line().unwrap(), None);
        assert_eq!(cur.line_number(), 0);
    }

    #[test]
    fn injected_line_comes_first_and_reads_nothing() {
        let mut cur = cursor("stream\n");
        cur.inject_line("b:1c=y");
        assert_eq!(cur.next_line().unwrap().as_deref(), Some("b:1c=y"));
        assert_eq!(cur.line_number(), 0);
        assert_eq!(cur.next_line().unwrap().as_deref(), Some("stream\n"));
    }

    #[test]
    fn next_lines_concatenates_raw_lines() {
        let mut cur = cursor("one\ntwo\nthree\n");
        assert_eq!(cur.next_lines(2).unwrap(), "one\ntwo\n");
        assert_eq!(cur.next_line().unwrap().as_deref(), Some("three\n"));
    }

    #[test]
    fn next_lines_reports_shortfall() {
        let mut cur = cursor("only\n");
        match cur.next_lines(3) {
            Err(CursorError::Exhausted {
                unit,
                requested,
                available,
            }) => {
                assert_eq!(unit, ContinuationUnit::Lines);
                assert_eq!(requested, 3);
                assert_eq!(available, 1);
            }
            other => panic!("expected shortfall, got {other:?}"),
        }
    }

    #[test]
    fn next_chars_crosses_lines() {
        let mut cur = cursor("ab\ncd\n");
        assert_eq!(cur.next_chars(4).unwrap(), "ab\nc");
        // Rest of the partially consumed line is the next logical line.
        assert_eq!(cur.next_line().unwrap().as_deref(), Some("d\n"));
    }

    #[test]
    fn next_chars_counts_scalar_values() {
        let mut cur = cursor("héé\nz");
        assert_eq!(cur.next_chars(3).unwrap(), "héé");
        assert_eq!(cur.next_chars(2).unwrap(), "\nz");
    }

    #[test]
    fn next_chars_zero_reads_nothing() {
        let mut cur = cursor("abc\n");
        assert_eq!(cur.next_chars(0).unwrap(), "");
        assert_eq!(cur.line_number(), 0);
    }

    #[test]
    fn next_chars_reports_shortfall() {
        let mut cur = cursor("xy");
        match cur.next_chars(5) {
            Err(CursorError::Exhausted {
                unit, available, ..
            }) => {
                assert_eq!(unit, ContinuationUnit::Chars);
                assert_eq!(available, 2);
            }
            other => panic!("expected shortfall, got {other:?}"),
        }
    }

    #[test]
    fn crlf_terminators_become_lf() {
        let mut cur = cursor("a\r\nbc\r\nd\re\r\n");
        assert_eq!(cur.next_line().unwrap().as_deref(), Some("a\n"));
        assert_eq!(cur.next_chars(3).unwrap(), "bc\n");
        // Only the terminator is rewritten.
        assert_eq!(cur.next_lines(1).unwrap(), "d\re\n");
    }

    #[test]
    fn invalid_utf8_is_an_io_error() {
        let bytes: &[u8] = &[b'a', b'=', 0xff, b'\n'];
        let mut cur = InputCursor::new(bytes, "<bytes>");
        assert!(matches!(cur.next_line(), Err(CursorError::Io(_))));
    }
}
