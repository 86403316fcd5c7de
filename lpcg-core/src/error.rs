use thiserror::Error;

#[derive(Error, Debug)]
pub enum LpcgError {
    #[error("The field {field} was not found on the {note_type} note type")]
    MissingField { field: String, note_type: String },

    #[error("Note type not found: {0}")]
    UnknownNoteType(String),

    #[error("Note type migration failed: {0}")]
    Migration(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl LpcgError {
    /// Convenience constructor for a schema mismatch.
    pub fn missing_field(field: &str, note_type: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
            note_type: note_type.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LpcgError>;

/// Note generation stopped partway through a poem.
///
/// Notes handed to the collection before the failing one are not rolled back;
/// `added` says how many there were.
#[derive(Error, Debug)]
#[error("Note generation stopped after {added} note(s): {source}")]
pub struct GenerationError {
    pub added: usize,
    #[source]
    pub source: LpcgError,
}

impl GenerationError {
    /// The `(field, note_type)` pair if generation stopped on a schema mismatch.
    pub fn missing_field(&self) -> Option<(&str, &str)> {
        match &self.source {
            LpcgError::MissingField { field, note_type } => Some((field, note_type)),
            _ => None,
        }
    }
}
