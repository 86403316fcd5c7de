//! Text processing: turning raw poem text into note-ready lines.

pub mod normalizer;

pub use normalizer::{INDENT_CLOSE, INDENT_OPEN, normalize};
