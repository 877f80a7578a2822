//! # Line Parsing
//!
//! A parse is a loop over logical lines:
//!
//! 1. **Classification** (`classify`): each logical line becomes a [`LineKind`]
//!    by priority-ordered pattern matching. Nothing is read from the stream.
//! 2. **Continuation** (`continuation`): counted forms (`key:<N>L=`, `key:<N>C=`)
//!    pull further raw lines or characters from the cursor.
//! 3. **Building** (`builder`): a [`DocumentBuilder`] stores entries, last write
//!    wins, and re-injects the tail of an over-long character value as the
//!    next logical line.
//!
//! ## Modules
//!
//! - **`cursor`**: [`InputCursor`] with next-line, next-chars and inject-line
//! - **`classify`**: [`LineClassifier`] and [`LineKind`]
//! - **`continuation`**: multi-line and multi-character value assembly
//! - **`builder`**: the driver loop
//!
//! ## Key Invariants
//!
//! - Keys never contain whitespace
//! - Counts start with a non-zero digit
//! - Character counts are Unicode scalar values, not bytes
//! - Unrecognized lines are dropped without error

pub mod builder;
pub mod classify;
pub mod continuation;
pub mod cursor;

pub use builder::DocumentBuilder;
pub use classify::{LineClassifier, LineKind};
pub use continuation::MultiCharValue;
pub use cursor::{CursorError, InputCursor};
