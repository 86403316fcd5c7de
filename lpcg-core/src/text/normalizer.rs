//! Text normalization: raw poem text into cleaned lines carrying end markers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::LpcgConfig;

/// Markup wrapped around a line that was indented in the source text.
pub const INDENT_OPEN: &str = r#"<span class="indent">"#;
pub const INDENT_CLOSE: &str = "</span>";

/// Every line boundary a pasted poem may carry, including bare `\r` and the
/// Unicode line/paragraph separators.
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c-\x1e\x{85}\x{2028}\x{2029}]")
        .expect("line break pattern should compile")
});

static LEADING_INDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]+").expect("indent pattern should compile"));

static TRAILING_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*#.*$").expect("comment pattern should compile"));

/// One line of the text after comment handling.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Line { indented: bool, text: String },
    /// A blank line; a run of them separates two stanzas.
    Blank,
}

/// Turn raw poem text into the list of lines notes are generated from.
///
/// This function:
/// - Records leading spaces/tabs as a single level of indentation
/// - Drops full-line comments and strips trailing `# comments`
/// - Collapses runs of blank lines into one stanza break, dropping leading
///   and trailing blanks
/// - Appends the end-of-stanza marker to the last line of each stanza and
///   the end-of-text marker to the very last line
/// - Wraps indented lines in `<span class="indent">`
///
/// Never fails: text with nothing but comments and blank lines yields an
/// empty list, which callers should report as nothing to generate.
pub fn normalize(text: &str, config: &LpcgConfig) -> Vec<String> {
    let entries: Vec<Entry> = split_lines(text).filter_map(parse_line).collect();
    let entries = collapse_blank_lines(entries);
    let lines = apply_end_markers(entries, config);

    log::debug!("Normalized text into {} line(s)", lines.len());
    lines
}

/// Split on any line boundary. A final boundary does not start a new line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let text = match LINE_BREAK.find_iter(text).last() {
        Some(end) if end.end() == text.len() => &text[..end.start()],
        _ => text,
    };
    LINE_BREAK.split(text)
}

/// Classify a physical line. Full-line comments are dropped entirely.
fn parse_line(raw: &str) -> Option<Entry> {
    let (indented, rest) = match LEADING_INDENT.find(raw) {
        Some(indent) => (true, &raw[indent.end()..]),
        None => (false, raw),
    };

    if rest.starts_with('#') {
        return None;
    }

    let without_comment = TRAILING_COMMENT.replace(rest, "");
    let text = without_comment.trim_end();
    if text.trim_start().is_empty() {
        Some(Entry::Blank)
    } else {
        Some(Entry::Line {
            indented,
            text: text.to_string(),
        })
    }
}

/// Keep at most one blank between two lines and none at either end.
fn collapse_blank_lines(entries: Vec<Entry>) -> Vec<Entry> {
    let mut collapsed = Vec::with_capacity(entries.len());

    for entry in entries {
        match entry {
            Entry::Blank if matches!(collapsed.last(), None | Some(Entry::Blank)) => {}
            entry => collapsed.push(entry),
        }
    }

    if matches!(collapsed.last(), Some(Entry::Blank)) {
        collapsed.pop();
    }

    collapsed
}

/// Mark stanza/text ends by looking ahead one entry, then drop the blanks.
fn apply_end_markers(entries: Vec<Entry>, config: &LpcgConfig) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len());
    let mut entries = entries.into_iter().peekable();

    while let Some(entry) = entries.next() {
        let Entry::Line { indented, mut text } = entry else {
            continue;
        };

        match entries.peek() {
            None => text.push_str(&config.end_of_text_marker),
            Some(Entry::Blank) => text.push_str(&config.end_of_stanza_marker),
            Some(Entry::Line { .. }) => {}
        }

        if indented {
            lines.push(format!("{INDENT_OPEN}{text}{INDENT_CLOSE}"));
        } else {
            lines.push(text);
        }
    }

    lines
}
