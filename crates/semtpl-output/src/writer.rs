//! Rendering and writing documents.

use std::fs;
use std::path::Path;

use semtpl_model::{Category, Document, FieldValue};

use crate::error::{OutputError, Result};
use crate::format::OutputFormat;

/// Plain scalars that a YAML 1.1 reader resolves to a bool or null.
const YAML11_RESERVED: &[&str] = &[
    "y", "n", "yes", "no", "on", "off", "true", "false", "null", "~",
];

/// Renders a document as text.
///
/// Top-level keys come out as `cubes, joins, dimensions, measures` and
/// record keys in insertion order. Empty lists are kept.
pub fn render(document: &Document, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Yaml => render_yaml(document)?,
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(document)?;
            text.push('\n');
            text
        }
    };
    Ok(text)
}

/// Block-style YAML with one flow `[]` per empty section.
///
/// Scalars are rendered one at a time by `serde_yaml`, so quoting follows its
/// rules, plus single quotes for the YAML 1.1 bool and null words.
fn render_yaml(document: &Document) -> Result<String> {
    let mut out = String::new();
    for category in Category::ALL {
        let records = document.records(category);
        if records.is_empty() {
            out.push_str(&format!("{}: []\n", category.section()));
            continue;
        }
        out.push_str(&format!("{}:\n", category.section()));
        for record in records {
            if record.is_empty() {
                out.push_str("- {}\n");
                continue;
            }
            for (idx, (key, value)) in record.iter().enumerate() {
                let marker = if idx == 0 { "- " } else { "  " };
                out.push_str(&format!(
                    "{marker}{}: {}\n",
                    yaml_text(key)?,
                    yaml_value(value)?
                ));
            }
        }
    }
    Ok(out)
}

fn yaml_value(value: &FieldValue) -> Result<String> {
    match value {
        FieldValue::Text(text) => yaml_text(text),
        other => Ok(serde_yaml::to_string(other)?.trim_end().to_string()),
    }
}

/// A string as a single-line YAML scalar.
fn yaml_text(text: &str) -> Result<String> {
    if YAML11_RESERVED
        .iter()
        .any(|word| text.eq_ignore_ascii_case(word))
    {
        return Ok(format!("'{text}'"));
    }
    let rendered = serde_yaml::to_string(text)?;
    let rendered = rendered.trim_end_matches('\n');
    if rendered.contains('\n') {
        // Multi-line block scalar: emit as a double-quoted string instead.
        return Ok(serde_json::to_string(text)?);
    }
    Ok(rendered.to_string())
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Renders a document and writes it to `path`, creating parent directories.
pub fn write_document(document: &Document, path: &Path, format: OutputFormat) -> Result<()> {
    let text = render(document, format)?;
    ensure_parent_dir(path)?;
    fs::write(path, text).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        format = %format,
        records = document.len(),
        "Wrote document"
    );
    Ok(())
}
