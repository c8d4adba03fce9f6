//! Tcl-style list encoding
//!
//! Every record of a GMA map file, and many attribute values inside a
//! record, are Tcl lists. This crate provides the two primitives the codec
//! needs:
//! - `parse_list` - split one list string into its elements
//! - `to_list_string` - join elements into a list string that parses back
//!   to the same elements
//!
//! Formatting never emits a raw line break, so a formatted list always fits
//! on one line of a map file.

mod format;
mod parse;

pub use format::{quote_element, to_list_string};
pub use parse::parse_list;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("unmatched open brace in list (element starting at byte {position})")]
    UnmatchedBrace { position: usize },

    #[error("unmatched open quote in list (element starting at byte {position})")]
    UnmatchedQuote { position: usize },

    #[error("list element in {delimiter} followed by {found:?} instead of space (byte {position})")]
    TrailingGarbage {
        delimiter: &'static str,
        found: char,
        position: usize,
    },
}

pub(crate) fn is_list_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}
