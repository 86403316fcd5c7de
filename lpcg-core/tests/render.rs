//! End-to-end rendering of a four-stanza poem through the in-memory collection.

use lpcg_core::{
    GenerationOptions, LPCG_NOTE_TYPE, LpcgConfig, MemoryCollection, MemoryNote, PoemMetadata,
    generate_notes, lpcg_note_type, normalize,
};

const POEM: &str = "# Samuel Longfellow
'Tis winter now; the fallen snow
Has left the heavens all coldly clear;
Through leafless boughs the sharp winds blow,
And all the earth lies dead and drear.

And yet God's love is not withdrawn;
His life within the keen air breathes;
God's beauty paints the crimson dawn,
And clothes the boughs with glittering wreaths.

And though abroad the sharp winds blow,
And skies are chill, and frosts are keen,
Home closer draws her circle now,
And warmer glows her light within.

O God! Who gives the winter's cold
As well as summer's joyous rays,
Us warmly in Thy love enfold,
And keep us through life's wintry days.
";

fn metadata() -> PoemMetadata {
    PoemMetadata {
        title: "'Tis Winter".to_string(),
        author: "Samuel Longfellow".to_string(),
        tags: vec!["poem".to_string(), "test".to_string()],
        deck_id: 1,
    }
}

fn render(context_lines: usize, recite_lines: usize, group_lines: usize) -> Vec<MemoryNote> {
    let text = normalize(POEM, &LpcgConfig::with_markers("X", "Y"));
    let options = GenerationOptions {
        context_lines,
        recite_lines,
        group_lines,
    };

    let mut collection = MemoryCollection::with_note_type(lpcg_note_type());
    let added = generate_notes(&mut collection, &text, &metadata(), &options).unwrap();
    assert_eq!(added, collection.notes().len());
    collection.into_notes()
}

fn field<'a>(note: &'a MemoryNote, name: &str) -> &'a str {
    note.field(name).expect("LPCG note type has the field")
}

fn paragraphs(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("<p>{line}</p>")).collect()
}

#[test]
fn test_render_default_settings() {
    let notes = render(2, 1, 1);
    assert_eq!(notes.len(), 16);

    assert_eq!(notes[0].note_type, LPCG_NOTE_TYPE);
    assert_eq!(field(&notes[0], "Title"), "'Tis Winter");
    assert_eq!(field(&notes[0], "Author"), "Samuel Longfellow");
    assert_eq!(notes[0].tags, vec!["poem", "test"]);
    assert_eq!(notes[0].deck_id, 1);
    assert_eq!(field(&notes[0], "Sequence"), "1");
    assert_eq!(field(&notes[0], "Context"), "<p>[Beginning]</p>");
    assert_eq!(
        field(&notes[0], "Line"),
        "<p>'Tis winter now; the fallen snow</p>"
    );
    assert_eq!(field(&notes[0], "Prompt"), "");

    assert_eq!(field(&notes[3], "Sequence"), "4");
    assert_eq!(
        field(&notes[3], "Context"),
        paragraphs(&[
            "Has left the heavens all coldly clear;",
            "Through leafless boughs the sharp winds blow,",
        ])
    );
    assert_eq!(
        field(&notes[3], "Line"),
        "<p>And all the earth lies dead and drear.Y</p>"
    );
    assert_eq!(field(&notes[3], "Prompt"), "");

    assert_eq!(
        field(&notes[15], "Line"),
        "<p>And keep us through life's wintry days.X</p>"
    );
}

#[test]
fn test_render_groups_of_two() {
    let notes = render(2, 1, 2);
    assert_eq!(notes.len(), 8);

    assert_eq!(field(&notes[0], "Sequence"), "1");
    assert_eq!(field(&notes[0], "Context"), "<p>[Beginning]</p>");
    assert_eq!(
        field(&notes[0], "Line"),
        paragraphs(&[
            "'Tis winter now; the fallen snow",
            "Has left the heavens all coldly clear;",
        ])
    );
    assert_eq!(field(&notes[0], "Prompt"), "[...2]");

    assert_eq!(field(&notes[1], "Sequence"), "2");
    assert_eq!(
        field(&notes[1], "Context"),
        paragraphs(&[
            "[Beginning]",
            "'Tis winter now; the fallen snow",
            "Has left the heavens all coldly clear;",
        ])
    );
    assert_eq!(
        field(&notes[1], "Line"),
        paragraphs(&[
            "Through leafless boughs the sharp winds blow,",
            "And all the earth lies dead and drear.Y",
        ])
    );
    assert_eq!(field(&notes[1], "Prompt"), "[...2]");
}

#[test]
fn test_render_groups_of_three() {
    let notes = render(2, 1, 3);
    assert_eq!(notes.len(), 6);

    assert_eq!(field(&notes[0], "Context"), "<p>[Beginning]</p>");
    assert_eq!(
        field(&notes[0], "Line"),
        paragraphs(&[
            "'Tis winter now; the fallen snow",
            "Has left the heavens all coldly clear;",
            "Through leafless boughs the sharp winds blow,",
        ])
    );
    assert_eq!(field(&notes[0], "Prompt"), "[...3]");

    // 16 % 3 == 1: six lines of context, one line to recite, no prompt.
    assert_eq!(field(&notes[5], "Sequence"), "6");
    assert_eq!(
        field(&notes[5], "Context"),
        paragraphs(&[
            "And skies are chill, and frosts are keen,",
            "Home closer draws her circle now,",
            "And warmer glows her light within.Y",
            "O God! Who gives the winter's cold",
            "As well as summer's joyous rays,",
            "Us warmly in Thy love enfold,",
        ])
    );
    assert_eq!(
        field(&notes[5], "Line"),
        "<p>And keep us through life's wintry days.X</p>"
    );
    assert_eq!(field(&notes[5], "Prompt"), "");
}

#[test]
fn test_render_three_context_lines() {
    let notes = render(3, 1, 1);
    assert_eq!(notes.len(), 16);

    assert_eq!(field(&notes[0], "Context"), "<p>[Beginning]</p>");
    assert_eq!(
        field(&notes[1], "Context"),
        paragraphs(&["[Beginning]", "'Tis winter now; the fallen snow"])
    );
    assert_eq!(
        field(&notes[2], "Context"),
        paragraphs(&[
            "[Beginning]",
            "'Tis winter now; the fallen snow",
            "Has left the heavens all coldly clear;",
        ])
    );
    assert_eq!(
        field(&notes[3], "Context"),
        paragraphs(&[
            "'Tis winter now; the fallen snow",
            "Has left the heavens all coldly clear;",
            "Through leafless boughs the sharp winds blow,",
        ])
    );
    assert_eq!(
        field(&notes[4], "Context"),
        paragraphs(&[
            "Has left the heavens all coldly clear;",
            "Through leafless boughs the sharp winds blow,",
            "And all the earth lies dead and drear.Y",
        ])
    );
    assert_eq!(
        field(&notes[4], "Line"),
        "<p>And yet God's love is not withdrawn;</p>"
    );
}

#[test]
fn test_render_two_recitation_lines() {
    let notes = render(2, 2, 1);
    // More recitation only adds overlap; the note count is unchanged.
    assert_eq!(notes.len(), 16);

    assert_eq!(
        field(&notes[0], "Line"),
        paragraphs(&[
            "'Tis winter now; the fallen snow",
            "Has left the heavens all coldly clear;",
        ])
    );
    assert_eq!(field(&notes[0], "Prompt"), "[...2]");

    assert_eq!(
        field(&notes[2], "Context"),
        paragraphs(&[
            "'Tis winter now; the fallen snow",
            "Has left the heavens all coldly clear;",
        ])
    );
    assert_eq!(
        field(&notes[2], "Line"),
        paragraphs(&[
            "Through leafless boughs the sharp winds blow,",
            "And all the earth lies dead and drear.Y",
        ])
    );

    let last = notes.last().unwrap();
    assert_eq!(
        field(last, "Context"),
        paragraphs(&[
            "As well as summer's joyous rays,",
            "Us warmly in Thy love enfold,",
        ])
    );
    assert_eq!(
        field(last, "Line"),
        "<p>And keep us through life's wintry days.X</p>"
    );
    assert_eq!(field(last, "Prompt"), "");
}

#[test]
fn test_render_increase_all_options() {
    // Groups of 2 give 8 virtual lines; 3 of them as context, 2 to recite.
    let notes = render(3, 2, 2);
    assert_eq!(notes.len(), 8);

    assert_eq!(field(&notes[0], "Context"), "<p>[Beginning]</p>");
    assert_eq!(field(&notes[0], "Prompt"), "[...4]");

    assert_eq!(
        field(&notes[3], "Context"),
        paragraphs(&[
            "'Tis winter now; the fallen snow",
            "Has left the heavens all coldly clear;",
            "Through leafless boughs the sharp winds blow,",
            "And all the earth lies dead and drear.Y",
            "And yet God's love is not withdrawn;",
            "His life within the keen air breathes;",
        ])
    );
    assert_eq!(
        field(&notes[3], "Line"),
        paragraphs(&[
            "God's beauty paints the crimson dawn,",
            "And clothes the boughs with glittering wreaths.Y",
            "And though abroad the sharp winds blow,",
            "And skies are chill, and frosts are keen,",
        ])
    );
    assert_eq!(field(&notes[3], "Prompt"), "[...4]");

    assert_eq!(
        field(&notes[7], "Line"),
        paragraphs(&[
            "Us warmly in Thy love enfold,",
            "And keep us through life's wintry days.X",
        ])
    );
    assert_eq!(field(&notes[7], "Prompt"), "[...2]");
}

#[test]
fn test_comment_only_text_generates_nothing() {
    let text = normalize("# just a title\n\n# and a note\n", &LpcgConfig::default());
    assert!(text.is_empty());

    let mut collection = MemoryCollection::with_note_type(lpcg_note_type());
    let added =
        generate_notes(&mut collection, &text, &metadata(), &GenerationOptions::default()).unwrap();
    assert_eq!(added, 0);
}
