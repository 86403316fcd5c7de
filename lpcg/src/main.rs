//! lpcg - Generate lyrics/poetry recall flashcards from plain text

mod export;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use export::OutputFormat;
use lpcg_core::model::{self, CURRENT_VERSION, NoteTypeSchema, UNVERSIONED};
use lpcg_core::{
    GenerationOptions, LPCG_NOTE_TYPE, LpcgConfig, MemoryCollection, PoemMetadata, generate_notes,
    lpcg_note_type, normalize,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lpcg")]
#[command(about = "Generate lyrics/poetry recall flashcards from plain text", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the poem text file (UTF-8)
    poem_file: Option<PathBuf>,

    /// Title of the poem, shown on every card
    #[arg(short, long)]
    title: Option<String>,

    /// Author of the poem
    #[arg(short, long, default_value = "")]
    author: String,

    /// Tags to add to every note (space-separated)
    #[arg(long, default_value = "")]
    tags: String,

    /// Deck ID to place the notes in
    #[arg(long, default_value_t = 1)]
    deck: i64,

    /// Lines of context before the tested line (default from config)
    #[arg(short, long)]
    context: Option<usize>,

    /// Lines to recite on each card (default from config)
    #[arg(short, long, value_parser = parse_positive)]
    recite: Option<usize>,

    /// Treat this many lines as one line (default from config)
    #[arg(short, long, value_parser = parse_positive)]
    group: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Inspect and upgrade the LPCG note type
    NoteType {
        #[command(subcommand)]
        action: NoteTypeAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the marker appended to the last line of the text
    SetTextMarker {
        /// Marker text
        marker: String,
    },
    /// Set the marker appended to the last line of each stanza
    SetStanzaMarker {
        /// Marker text
        marker: String,
    },
    /// Set default lines of context
    SetContext {
        /// Value (0 or more)
        value: usize,
    },
    /// Set default lines to recite
    SetRecite {
        /// Value (1 or more)
        #[arg(value_parser = parse_positive)]
        value: usize,
    },
    /// Set default group size
    SetGroup {
        /// Value (1 or more)
        #[arg(value_parser = parse_positive)]
        value: usize,
    },
}

#[derive(Subcommand, Debug)]
enum NoteTypeAction {
    /// Print the note type definition as JSON
    Show {
        /// Print the pre-versioning definition instead of the current one
        #[arg(long)]
        legacy: bool,
    },
    /// Upgrade a note type definition (JSON) to the current version
    Upgrade {
        /// Path to the note type JSON
        schema_file: PathBuf,
        /// Version the note type is currently at
        #[arg(long, default_value = UNVERSIONED)]
        from: String,
    },
}

#[derive(Serialize)]
struct VersionedNoteType<'a> {
    version: &'a str,
    note_type: &'a NoteTypeSchema,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    // Handle subcommands
    match &args.command {
        Some(Commands::Config { action }) => {
            return handle_config_command(action);
        }
        Some(Commands::NoteType { action }) => {
            return handle_note_type_command(action);
        }
        None => {}
    }

    let poem_path = args
        .poem_file
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Poem file path is required. Run 'lpcg --help' for usage."))?;

    if !poem_path.exists() {
        anyhow::bail!("Poem file not found: {}", poem_path.display());
    }

    let title = args.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        anyhow::bail!("You must enter a title for this poem (--title).");
    }

    let config = LpcgConfig::load().context("Failed to load configuration")?;
    let raw_text = fs::read_to_string(&poem_path)
        .with_context(|| format!("Failed to read {}", poem_path.display()))?;

    let text = normalize(&raw_text, &config);
    if text.is_empty() {
        anyhow::bail!(
            "There's nothing to generate cards from! \
             The file has no lines that aren't blank or comments."
        );
    }

    let options = GenerationOptions {
        context_lines: args.context.unwrap_or(config.default_lines_of_context),
        recite_lines: args.recite.unwrap_or(config.default_lines_to_recite),
        group_lines: args.group.unwrap_or(config.default_lines_in_groups_of),
    };
    let metadata = PoemMetadata {
        title: title.to_string(),
        author: args.author.trim().to_string(),
        tags: split_tags(&args.tags),
        deck_id: args.deck,
    };

    log::debug!("Poem: {}", poem_path.display());
    log::debug!("Lines after cleanup: {}", text.len());
    log::debug!("Options: {:?}", options);

    let mut collection = MemoryCollection::with_note_type(lpcg_note_type());
    let added = match generate_notes(&mut collection, &text, &metadata, &options) {
        Ok(added) => added,
        Err(err) => {
            if let Some((field, note_type)) = err.missing_field() {
                anyhow::bail!(
                    "The field {field} was not found on the {note_type} note type. \
                     If you don't have any LPCG notes yet, delete the note type and \
                     let it be recreated. Otherwise, please add the field back to the note type."
                );
            }
            return Err(err.into());
        }
    };

    export::write_notes(collection.notes(), args.format, args.output.as_deref())
        .context("Failed to write notes")?;

    eprintln!("{} notes added.", added);
    Ok(())
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Parse a count that must be at least 1.
fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn split_tags(tags: &str) -> Vec<String> {
    tags.split_whitespace().map(str::to_string).collect()
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = LpcgConfig::load()?;
            println!("Configuration file: {:?}", LpcgConfig::config_path()?);
            println!();
            println!("endOfTextMarker = \"{}\"", config.end_of_text_marker);
            println!("endOfStanzaMarker = \"{}\"", config.end_of_stanza_marker);
            println!("defaultLinesOfContext = {}", config.default_lines_of_context);
            println!("defaultLinesToRecite = {}", config.default_lines_to_recite);
            println!("defaultLinesInGroupsOf = {}", config.default_lines_in_groups_of);
        }
        ConfigAction::SetTextMarker { marker } => {
            let mut config = LpcgConfig::load()?;
            config.end_of_text_marker = marker.clone();
            config.save()?;
            println!("End-of-text marker set to: {}", marker);
        }
        ConfigAction::SetStanzaMarker { marker } => {
            let mut config = LpcgConfig::load()?;
            config.end_of_stanza_marker = marker.clone();
            config.save()?;
            println!("End-of-stanza marker set to: {}", marker);
        }
        ConfigAction::SetContext { value } => {
            let mut config = LpcgConfig::load()?;
            config.default_lines_of_context = *value;
            config.save()?;
            println!("Default lines of context set to: {}", value);
        }
        ConfigAction::SetRecite { value } => {
            let mut config = LpcgConfig::load()?;
            config.default_lines_to_recite = *value;
            config.save()?;
            println!("Default lines to recite set to: {}", value);
        }
        ConfigAction::SetGroup { value } => {
            let mut config = LpcgConfig::load()?;
            config.default_lines_in_groups_of = *value;
            config.save()?;
            println!("Default group size set to: {}", value);
        }
    }
    Ok(())
}

fn handle_note_type_command(action: &NoteTypeAction) -> Result<()> {
    match action {
        NoteTypeAction::Show { legacy } => {
            let (version, note_type) = if *legacy {
                (UNVERSIONED, model::legacy_note_type())
            } else {
                (CURRENT_VERSION, lpcg_note_type())
            };
            print_note_type(version, &note_type)?;
        }
        NoteTypeAction::Upgrade { schema_file, from } => {
            let content = fs::read_to_string(schema_file)
                .with_context(|| format!("Failed to read {}", schema_file.display()))?;
            let note_type: NoteTypeSchema =
                serde_json::from_str(&content).context("Failed to parse note type JSON")?;

            if model::is_current(from) {
                eprintln!("The {} note type is already at version {}.", LPCG_NOTE_TYPE, from);
                return print_note_type(from, &note_type);
            }
            if !model::can_upgrade(from) {
                anyhow::bail!(
                    "No upgrade path from version {} of the {} note type.",
                    from,
                    LPCG_NOTE_TYPE
                );
            }

            let (version, upgraded) = model::upgrade(from, note_type)?;
            eprintln!("Upgraded the {} note type from {} to {}.", LPCG_NOTE_TYPE, from, version);
            print_note_type(&version, &upgraded)?;
        }
    }
    Ok(())
}

fn print_note_type(version: &str, note_type: &NoteTypeSchema) -> Result<()> {
    let versioned = VersionedNoteType { version, note_type };
    println!("{}", serde_json::to_string_pretty(&versioned)?);
    Ok(())
}
