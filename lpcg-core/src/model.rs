//! The LPCG note type and the migrations between its versions.
//!
//! A host stores the version its copy of the note type is at and calls
//! [`upgrade`] to bring the schema up to [`CURRENT_VERSION`]. Note types
//! created before versioning existed are at [`UNVERSIONED`].

use serde::{Deserialize, Serialize};

use crate::error::{LpcgError, Result};

pub const LPCG_NOTE_TYPE: &str = "LPCG 1.0";
pub const CURRENT_VERSION: &str = "1.4.0";
pub const UNVERSIONED: &str = "none";

/// A card template: front and back HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub name: String,
    pub front: String,
    pub back: String,
}

/// A note type as the host would store it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteTypeSchema {
    pub name: String,
    pub fields: Vec<String>,
    pub templates: Vec<CardTemplate>,
    pub css: String,
    /// Index into `fields` the host sorts by
    pub sort_field: usize,
    pub is_cloze: bool,
}

impl NoteTypeSchema {
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    fn add_field(&mut self, name: &str) {
        if !self.has_field(name) {
            self.fields.push(name.to_string());
        }
    }

    fn only_template(&mut self) -> Result<&mut CardTemplate> {
        if self.templates.len() != 1 {
            return Err(LpcgError::Migration(format!(
                "{} note type has {} templates, expected exactly one",
                self.name,
                self.templates.len()
            )));
        }
        Ok(&mut self.templates[0])
    }
}

const FRONT_TEMPLATE: &str = r#"<div class="title">{{Title}} {{Sequence}}</div>
{{#Author}}<div class="author">{{Author}}</div>{{/Author}}

<br>

<div class="lines">
{{Context}}
<div class="cloze">
{{#Prompt}}{{Prompt}}{{/Prompt}}
{{^Prompt}}[...]{{/Prompt}}
</div>
</div>"#;

const BACK_TEMPLATE: &str = r#"<div class="title">{{Title}} {{Sequence}}</div>
{{#Author}}<div class="author">{{Author}}</div>{{/Author}}

<br>

<div class="lines">
{{Context}}
<div class="cloze">{{Line}}</div>
</div>"#;

const STYLING: &str = r#".card {
 font-family: arial;
 font-size: 20px;
 color: black;
 background-color: white;
}

p {
 margin-top: 0px;
 margin-bottom: 0px;
}

.lines {
 text-align: left;
 margin-left: 30px;
 text-indent: -30px;
 margin-right: 30px;
}

.cloze {
 font-weight: bold;
 color: blue;
}

.nightMode .cloze {
 filter: invert(85%);
}

.title, .author {
 text-align: center;
 font-size: small;
}

.indent {
 margin-left: 60px;
}"#;

const LEGACY_FRONT_TEMPLATE: &str = r#"<div class="title">{{Title}} {{Sequence}}</div>

<br>

<div class="lines">
{{Context}}
<span class="cloze">[...]</span>
</div>"#;

const LEGACY_BACK_TEMPLATE: &str = r#"<div class="title">{{Title}} {{Sequence}}</div>

<br>

<div class="lines">
{{Context}}
<span class="cloze">{{Line}}</span>
</div>"#;

const LEGACY_STYLING: &str = r#".card {
 font-family: arial;
 font-size: 20px;
 color: black;
 background-color: white;
}

p {
 margin-top: 0px;
 margin-bottom: 0px;
}

.lines {
 text-align: left;
 margin-left: 30px;
 text-indent: -30px;
 margin-right: 30px;
}

.cloze {
 font-weight: bold;
 color: blue;
 margin-left: -30px;
}

.title {
 text-align: center;
 font-size: small;
}

.indent {
 margin-left: 60px;
}"#;

const NIGHT_MODE_CLOZE: &str = ".nightMode .cloze {\n filter: invert(85%);\n}";

fn schema(fields: &[&str], front: &str, back: &str, css: &str) -> NoteTypeSchema {
    NoteTypeSchema {
        name: LPCG_NOTE_TYPE.to_string(),
        fields: fields.iter().map(|f| f.to_string()).collect(),
        templates: vec![CardTemplate {
            name: "LPCG1".to_string(),
            front: front.to_string(),
            back: back.to_string(),
        }],
        css: css.to_string(),
        sort_field: fields
            .iter()
            .position(|f| *f == "Sequence")
            .unwrap_or_default(),
        is_cloze: false,
    }
}

/// The note type at [`CURRENT_VERSION`], as created in a fresh collection.
pub fn lpcg_note_type() -> NoteTypeSchema {
    schema(
        &["Line", "Context", "Title", "Author", "Sequence", "Prompt"],
        FRONT_TEMPLATE,
        BACK_TEMPLATE,
        STYLING,
    )
}

/// The note type as it was before versioning ([`UNVERSIONED`]).
pub fn legacy_note_type() -> NoteTypeSchema {
    schema(
        &["Line", "Context", "Title", "Sequence"],
        LEGACY_FRONT_TEMPLATE,
        LEGACY_BACK_TEMPLATE,
        LEGACY_STYLING,
    )
}

type MigrateFn = fn(&mut NoteTypeSchema) -> Result<()>;

/// Migrations in chronological order: (from version, to version, change).
const MIGRATIONS: &[(&str, &str, MigrateFn)] = &[
    (UNVERSIONED, "1.3.0", add_prompt_field),
    ("1.3.0", "1.4.0", add_author_field),
];

/// Add the Prompt field, night-mode cloze styling, and block-level clozes.
fn add_prompt_field(schema: &mut NoteTypeSchema) -> Result<()> {
    schema.add_field("Prompt");

    if !schema.css.contains(".nightMode .cloze") {
        schema.css.push_str("\n\n");
        schema.css.push_str(NIGHT_MODE_CLOZE);
    }
    schema.css = schema.css.replace("\n margin-left: -30px;", "");

    let template = schema.only_template()?;
    template.front = template.front.replace(
        r#"<span class="cloze">[...]</span>"#,
        "<div class=\"cloze\">\n{{#Prompt}}{{Prompt}}{{/Prompt}}\n{{^Prompt}}[...]{{/Prompt}}\n</div>",
    );
    template.back = template.back.replace(
        r#"<span class="cloze">{{Line}}</span>"#,
        r#"<div class="cloze">{{Line}}</div>"#,
    );
    Ok(())
}

/// Add the Author field and show it under the title on both sides.
fn add_author_field(schema: &mut NoteTypeSchema) -> Result<()> {
    schema.add_field("Author");
    schema.css = schema.css.replace(".title {", ".title, .author {");

    const TITLE: &str = r#"<div class="title">{{Title}} {{Sequence}}</div>"#;
    let with_author = format!("{TITLE}\n{{{{#Author}}}}<div class=\"author\">{{{{Author}}}}</div>{{{{/Author}}}}");

    let template = schema.only_template()?;
    template.front = template.front.replace(TITLE, &with_author);
    template.back = template.back.replace(TITLE, &with_author);
    Ok(())
}

/// Run every migration applicable from `version`, in order.
///
/// Returns the version reached and the migrated schema. A version with no
/// known migrations comes back unchanged.
pub fn upgrade(version: &str, mut schema: NoteTypeSchema) -> Result<(String, NoteTypeSchema)> {
    let mut at_version = version.to_string();

    for (from, to, migrate) in MIGRATIONS {
        if at_version == *from {
            log::debug!("Upgrading {} note type from {} to {}", schema.name, from, to);
            migrate(&mut schema)?;
            at_version = to.to_string();
        }
    }

    Ok((at_version, schema))
}

/// Whether a newer version than `version` is reachable.
pub fn can_upgrade(version: &str) -> bool {
    !is_current(version) && MIGRATIONS.iter().any(|(from, _, _)| *from == version)
}

pub fn is_current(version: &str) -> bool {
    version == CURRENT_VERSION
}
