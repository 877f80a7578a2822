pub mod document;
pub mod error;
pub mod io;
pub mod parsing;

// Re-export key types for easier usage
pub use document::ConfigDocument;
pub use error::{ContinuationUnit, LookupError, ParseError};
pub use io::{parse, parse_buffered, parse_path, parse_str};
