//! Lyrics/Poetry Cloze Generator engine
//!
//! Turns the text of a poem into flashcard notes, one per line (or group of
//! lines), each asking the learner to recite it from a few lines of context:
//! - [`normalize`] cleans raw text into lines with stanza/text end markers
//! - [`PoemChain`] links those lines and works out context and recitation
//! - [`generate_notes`] fills one note per line into a host [`NoteCollection`]

pub mod config;
pub mod error;
pub mod memory;
pub mod model;
pub mod notes;
pub mod poem;
pub mod text;

pub use config::LpcgConfig;
pub use error::{GenerationError, LpcgError, Result};
pub use memory::{MemoryCollection, MemoryNote};
pub use model::{LPCG_NOTE_TYPE, NoteTypeSchema, lpcg_note_type};
pub use notes::{
    GenerationOptions, Note, NoteCollection, NoteFields, PoemMetadata, generate_notes,
    generate_notes_of_type,
};
pub use poem::{LineRef, PoemChain};
pub use text::normalize;
