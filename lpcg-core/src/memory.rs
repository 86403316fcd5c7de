//! In-memory note collection.
//!
//! Backs the command-line host and the tests: notes are checked against the
//! registered note type exactly as a real collection would check them.

use std::collections::BTreeMap;

use crate::error::{LpcgError, Result};
use crate::model::NoteTypeSchema;
use crate::notes::{Note, NoteCollection};

/// A note held in memory, with every field of its note type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryNote {
    pub note_type: String,
    /// Field values in note-type order
    pub fields: Vec<(String, String)>,
    pub tags: Vec<String>,
    pub deck_id: i64,
}

impl MemoryNote {
    fn new(schema: &NoteTypeSchema) -> Self {
        Self {
            note_type: schema.name.clone(),
            fields: schema
                .fields
                .iter()
                .map(|name| (name.clone(), String::new()))
                .collect(),
            tags: Vec::new(),
            deck_id: 0,
        }
    }

    /// Get a field's value, `None` if the note type lacks it.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Note for MemoryNote {
    fn set_field(&mut self, name: &str, value: String) -> Result<()> {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => {
                *slot = value;
                Ok(())
            }
            None => Err(LpcgError::missing_field(name, &self.note_type)),
        }
    }

    fn set_tags(&mut self, tags: &[String]) {
        self.tags = tags.to_vec();
    }

    fn set_deck(&mut self, deck_id: i64) {
        self.deck_id = deck_id;
    }
}

/// Note types by name, plus every note added so far.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    note_types: BTreeMap<String, NoteTypeSchema>,
    notes: Vec<MemoryNote>,
}

impl MemoryCollection {
    /// Create a collection with one note type registered
    pub fn with_note_type(schema: NoteTypeSchema) -> Self {
        let mut collection = Self::default();
        collection.add_note_type(schema);
        collection
    }

    /// Register a note type, replacing any existing one of the same name
    pub fn add_note_type(&mut self, schema: NoteTypeSchema) {
        self.note_types.insert(schema.name.clone(), schema);
    }

    pub fn note_type(&self, name: &str) -> Option<&NoteTypeSchema> {
        self.note_types.get(name)
    }

    pub fn notes(&self) -> &[MemoryNote] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<MemoryNote> {
        self.notes
    }
}

impl NoteCollection for MemoryCollection {
    type Note = MemoryNote;

    fn new_note(&mut self, note_type: &str) -> Result<MemoryNote> {
        self.note_types
            .get(note_type)
            .map(MemoryNote::new)
            .ok_or_else(|| LpcgError::UnknownNoteType(note_type.to_string()))
    }

    fn add_note(&mut self, note: MemoryNote) -> Result<()> {
        log::trace!("Adding note with {} field(s)", note.fields.len());
        self.notes.push(note);
        Ok(())
    }
}
