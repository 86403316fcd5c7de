//! Writing generated notes out for import into a flashcard application.

use anyhow::Result;
use clap::ValueEnum;
use lpcg_core::MemoryNote;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON array, one object per note
    Json,
    /// Tab-separated rows with import headers
    Tsv,
}

#[derive(Debug, Serialize)]
struct ExportedNote<'a> {
    note_type: &'a str,
    deck_id: i64,
    tags: &'a [String],
    fields: BTreeMap<&'a str, &'a str>,
}

impl<'a> From<&'a MemoryNote> for ExportedNote<'a> {
    fn from(note: &'a MemoryNote) -> Self {
        Self {
            note_type: &note.note_type,
            deck_id: note.deck_id,
            tags: &note.tags,
            fields: note
                .fields
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect(),
        }
    }
}

/// Write notes to `output`, or stdout when no path is given.
pub fn write_notes(notes: &[MemoryNote], format: OutputFormat, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_to(&mut writer, notes, format)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_to(&mut writer, notes, format)?;
        }
    }
    Ok(())
}

fn write_to<W: Write>(writer: &mut W, notes: &[MemoryNote], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(writer, notes),
        OutputFormat::Tsv => write_tsv(writer, notes),
    }
}

fn write_json<W: Write>(writer: &mut W, notes: &[MemoryNote]) -> Result<()> {
    let exported: Vec<ExportedNote> = notes.iter().map(ExportedNote::from).collect();
    serde_json::to_writer_pretty(&mut *writer, &exported)?;
    writeln!(writer)?;
    Ok(())
}

/// One row per note: field values in note-type order, then the tags.
///
/// Tabs and line breaks inside values become spaces so rows stay aligned.
fn write_tsv<W: Write>(writer: &mut W, notes: &[MemoryNote]) -> Result<()> {
    let Some(first) = notes.first() else {
        return Ok(());
    };

    writeln!(writer, "#separator:tab")?;
    writeln!(writer, "#html:true")?;
    writeln!(writer, "#notetype:{}", first.note_type)?;
    writeln!(writer, "#tags column:{}", first.fields.len() + 1)?;

    for note in notes {
        let mut columns: Vec<String> = note
            .fields
            .iter()
            .map(|(_, value)| tsv_cell(value))
            .collect();
        columns.push(tsv_cell(&note.tags.join(" ")));
        writeln!(writer, "{}", columns.join("\t"))?;
    }
    Ok(())
}

fn tsv_cell(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpcg_core::{
        GenerationOptions, LpcgConfig, MemoryCollection, PoemMetadata, generate_notes,
        lpcg_note_type, normalize,
    };
    use tempfile::TempDir;

    fn notes() -> Vec<MemoryNote> {
        let text = normalize("one\ntwo\n\nthree", &LpcgConfig::with_markers("X", "Y"));
        let metadata = PoemMetadata {
            title: "Count".to_string(),
            author: String::new(),
            tags: vec!["numbers".to_string(), "test".to_string()],
            deck_id: 1,
        };
        let mut collection = MemoryCollection::with_note_type(lpcg_note_type());
        generate_notes(&mut collection, &text, &metadata, &GenerationOptions::default()).unwrap();
        collection.into_notes()
    }

    #[test]
    fn test_write_json() {
        let mut buffer = Vec::new();
        write_to(&mut buffer, &notes(), OutputFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array[0]["note_type"], "LPCG 1.0");
        assert_eq!(array[1]["fields"]["Line"], "<p>twoY</p>");
        assert_eq!(array[2]["fields"]["Sequence"], "3");
        assert_eq!(array[2]["tags"][0], "numbers");
    }

    #[test]
    fn test_write_tsv() {
        let mut buffer = Vec::new();
        write_to(&mut buffer, &notes(), OutputFormat::Tsv).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "#separator:tab");
        assert_eq!(lines[2], "#notetype:LPCG 1.0");
        assert_eq!(lines[3], "#tags column:7");
        assert_eq!(lines.len(), 4 + 3);

        let columns: Vec<&str> = lines[4].split('\t').collect();
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[0], "<p>one</p>");
        assert_eq!(columns[1], "<p>[Beginning]</p>");
        assert_eq!(columns[6], "numbers test");
    }

    #[test]
    fn test_write_tsv_keeps_rows_on_one_line() {
        let mut notes = notes();
        notes[0].fields[2].1 = "Count\r\nto\tthree\n".to_string();

        let mut buffer = Vec::new();
        write_to(&mut buffer, &notes, OutputFormat::Tsv).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4 + 3);
        let columns: Vec<&str> = lines[4].split('\t').collect();
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[2], "Count to three ");
    }

    #[test]
    fn test_write_tsv_empty() {
        let mut buffer = Vec::new();
        write_to(&mut buffer, &[], OutputFormat::Tsv).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_write_notes_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");

        write_notes(&notes(), OutputFormat::Json, Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Title\": \"Count\""));
    }
}
