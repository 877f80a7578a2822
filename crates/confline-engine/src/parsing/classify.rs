use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Classification of one logical line.
///
/// Borrowed slices point into the classified line; nothing is copied until
/// the builder stores an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Comment,
    Blank,
    /// `key:<N>L=value`, value continues over `count - 1` further lines.
    MultiLineAssign {
        key: &'a str,
        count: usize,
        first_fragment: &'a str,
    },
    /// `key:<N>C=value`, value is exactly `count` characters long.
    MultiCharAssign {
        key: &'a str,
        count: usize,
        first_fragment: &'a str,
    },
    /// `key:=value`, whitespace inside the value is kept.
    RawAssign { key: &'a str, value: &'a str },
    /// `key=value`, value trimmed and unquoted.
    SimpleAssign { key: &'a str, value: &'a str },
    Unrecognized,
}

const COMMENT: &str = r"^\s*#";
const MULTI_LINE: &str = r"^\s*(?P<key>\S+?)\s*:(?P<count>[1-9][0-9]*)[lL]=(?P<value>\s*.+)";
const MULTI_CHAR: &str = r"^\s*(?P<key>\S+?)\s*:(?P<count>[1-9][0-9]*)[cC]=(?P<value>\s*.+)";
const RAW: &str = r"^\s*(?P<key>\S+?)\s*:=(?P<value>\s*.+)";
const SIMPLE: &str = r"^\s*(?P<key>\S+?)\s*=(?P<value>\s*.+)";

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Invalid line pattern"))
}

fn comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, COMMENT)
}

fn multi_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, MULTI_LINE)
}

fn multi_char_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, MULTI_CHAR)
}

fn raw_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, RAW)
}

fn simple_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, SIMPLE)
}

/// Strips trailing newline characters (`\n`, and the `\r` of `\r\n`), nothing else.
pub fn trim_newlines(s: &str) -> &str {
    s.trim_end_matches(['\r', '\n'])
}

/// Trims whitespace, then drops one quote from each end when both ends are `'`.
fn unquote(value: &str) -> &str {
    let value = value.trim();
    if value.starts_with('\'') && value.ends_with('\'') {
        // A lone quote is both the opening and closing one.
        if value.len() == 1 {
            return "";
        }
        return &value[1..value.len() - 1];
    }
    value
}

fn named<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// Counts that do not fit `usize` saturate; no stream can satisfy them.
fn count(caps: &Captures<'_>) -> usize {
    named(caps, "count").parse().unwrap_or(usize::MAX)
}

/// Classifies logical lines by priority-ordered pattern matching.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineClassifier;

impl LineClassifier {
    /// Classifies `line` (which may still carry its trailing newline).
    ///
    /// Rules are tried in order: comment, multi-line, multi-character, raw,
    /// simple, blank. The first match wins.
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if comment_regex().is_match(line) {
            return LineKind::Comment;
        }

        if let Some(caps) = multi_line_regex().captures(line) {
            return LineKind::MultiLineAssign {
                key: named(&caps, "key"),
                count: count(&caps),
                first_fragment: named(&caps, "value"),
            };
        }

        if let Some(caps) = multi_char_regex().captures(line) {
            return LineKind::MultiCharAssign {
                key: named(&caps, "key"),
                count: count(&caps),
                first_fragment: named(&caps, "value"),
            };
        }

        if let Some(caps) = raw_regex().captures(line) {
            return LineKind::RawAssign {
                key: named(&caps, "key"),
                value: trim_newlines(named(&caps, "value")),
            };
        }

        if let Some(caps) = simple_regex().captures(line) {
            return LineKind::SimpleAssign {
                key: named(&caps, "key"),
                value: unquote(trim_newlines(named(&caps, "value"))),
            };
        }

        if line.trim().is_empty() {
            LineKind::Blank
        } else {
            LineKind::Unrecognized
        }
    }
}
