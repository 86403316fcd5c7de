//! Note emission: one note per poem line, handed to a host collection.

use crate::config::LpcgConfig;
use crate::error::{GenerationError, Result};
use crate::model::LPCG_NOTE_TYPE;
use crate::poem::{LineRef, PoemChain};

/// Field names on the LPCG note type.
pub mod field {
    pub const LINE: &str = "Line";
    pub const CONTEXT: &str = "Context";
    pub const TITLE: &str = "Title";
    pub const AUTHOR: &str = "Author";
    pub const SEQUENCE: &str = "Sequence";
    pub const PROMPT: &str = "Prompt";
}

/// Rendered field values for the note testing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    pub sequence: String,
    pub context: String,
    pub line: String,
    pub prompt: Option<String>,
}

/// Per-poem values copied onto every note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoemMetadata {
    pub title: String,
    pub author: String,
    pub tags: Vec<String>,
    pub deck_id: i64,
}

/// How much context and recitation each note gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Virtual lines shown before the tested line
    pub context_lines: usize,
    /// Virtual lines to recite
    pub recite_lines: usize,
    /// Physical lines per virtual line
    pub group_lines: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::from(&LpcgConfig::default())
    }
}

impl From<&LpcgConfig> for GenerationOptions {
    fn from(config: &LpcgConfig) -> Self {
        Self {
            context_lines: config.default_lines_of_context,
            recite_lines: config.default_lines_to_recite,
            group_lines: config.default_lines_in_groups_of,
        }
    }
}

/// A note owned by the host application.
pub trait Note {
    /// Set a field, failing with `LpcgError::MissingField` if the note type
    /// has no such field.
    fn set_field(&mut self, name: &str, value: String) -> Result<()>;

    fn set_tags(&mut self, tags: &[String]);

    fn set_deck(&mut self, deck_id: i64);
}

/// The host's note store: a note factory plus a sink for finished notes.
pub trait NoteCollection {
    type Note: Note;

    /// Create an empty note of the named note type
    fn new_note(&mut self, note_type: &str) -> Result<Self::Note>;

    /// Persist a populated note
    fn add_note(&mut self, note: Self::Note) -> Result<()>;
}

/// Copy rendered fields and poem metadata onto a note.
///
/// The Prompt field is only touched when there is a prompt, so the card
/// template falls back to its generic placeholder otherwise.
pub fn fill_note<N: Note>(note: &mut N, fields: NoteFields, metadata: &PoemMetadata) -> Result<()> {
    note.set_deck(metadata.deck_id);
    note.set_tags(&metadata.tags);
    note.set_field(field::TITLE, metadata.title.clone())?;
    note.set_field(field::AUTHOR, metadata.author.clone())?;
    note.set_field(field::SEQUENCE, fields.sequence)?;
    note.set_field(field::CONTEXT, fields.context)?;
    note.set_field(field::LINE, fields.line)?;
    if let Some(prompt) = fields.prompt {
        note.set_field(field::PROMPT, prompt)?;
    }
    Ok(())
}

fn add_line<C: NoteCollection>(
    collection: &mut C,
    note_type: &str,
    line: LineRef<'_>,
    metadata: &PoemMetadata,
    options: &GenerationOptions,
) -> Result<()> {
    let mut note = collection.new_note(note_type)?;
    let fields = line.populate(options.context_lines, options.recite_lines);
    fill_note(&mut note, fields, metadata)?;
    collection.add_note(note)
}

/// Generate a note for every line of the poem and add it to `collection`.
///
/// `text_lines` should come from [`crate::text::normalize`]; an empty list
/// adds nothing. Returns the number of notes added. On failure nothing
/// already added is rolled back, and the error records how many notes made it.
pub fn generate_notes<C: NoteCollection>(
    collection: &mut C,
    text_lines: &[String],
    metadata: &PoemMetadata,
    options: &GenerationOptions,
) -> std::result::Result<usize, GenerationError> {
    generate_notes_of_type(collection, LPCG_NOTE_TYPE, text_lines, metadata, options)
}

/// Like [`generate_notes`], for a host that keeps the LPCG fields on a note
/// type under another name.
pub fn generate_notes_of_type<C: NoteCollection>(
    collection: &mut C,
    note_type: &str,
    text_lines: &[String],
    metadata: &PoemMetadata,
    options: &GenerationOptions,
) -> std::result::Result<usize, GenerationError> {
    let chain = PoemChain::build(text_lines, options.group_lines);
    let mut added = 0;

    for line in chain.lines() {
        if let Err(source) = add_line(collection, note_type, line, metadata, options) {
            log::warn!("Stopped at line {} of \"{}\": {}", line.seq(), metadata.title, source);
            return Err(GenerationError { added, source });
        }
        added += 1;
    }

    log::debug!("Added {} note(s) for \"{}\"", added, metadata.title);
    Ok(added)
}
