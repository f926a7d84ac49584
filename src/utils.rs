use std::{collections::BTreeSet, fmt};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use serde_json::Value;
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Derives the filesystem-safe export key for a playlist.
///
/// The key is `sanitize(name)_id`: the name is lowercased with every
/// character outside `[a-z0-9_-]` replaced by `_`, the id is appended
/// untouched. The same (name, id) pair always yields the same key,
/// regardless of fetch order.
pub fn export_key(name: &str, id: &str) -> String {
    format!("{}_{}", sanitize_stem(name), id)
}

fn sanitize_stem(stem: &str) -> String {
    stem.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Sorts artist records by name, using plain string ordering (uppercase
/// before lowercase). Records without a name sort first.
pub fn sort_artists(artists: &mut [Value]) {
    artists.sort_by(|a, b| {
        let a_name = a["name"].as_str().unwrap_or_default();
        let b_name = b["name"].as_str().unwrap_or_default();
        a_name.cmp(b_name)
    });
}

/// Quotes a CSV field as a JSON string, escaping quotes and control
/// characters.
pub fn csv_quote(field: &str) -> String {
    serde_json::Value::from(field).to_string()
}

/// Escapes text for inclusion in XML element content or attribute values.
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Appends a query parameter to a URL that may or may not already carry a
/// query string.
pub fn with_param(url: &str, param: &str) -> String {
    if url.contains('?') {
        format!("{}&{}", url, param)
    } else {
        format!("{}?{}", url, param)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputFormat {
    Raw,
    Csv,
    Xspf,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Raw, OutputFormat::Csv, OutputFormat::Xspf];

    /// File extension for exports in this format.
    pub fn ext(&self) -> &'static str {
        match self {
            OutputFormat::Raw => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Xspf => "xspf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Raw => "raw",
            OutputFormat::Csv => "csv",
            OutputFormat::Xspf => "xspf",
        };
        write!(f, "{}", name)
    }
}

/// Set of enabled output formats, ordered and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormats(pub BTreeSet<OutputFormat>);

impl OutputFormats {
    pub fn contains(&self, format: OutputFormat) -> bool {
        self.0.contains(&format)
    }

    pub fn iter(&self) -> impl Iterator<Item = OutputFormat> + '_ {
        self.0.iter().copied()
    }
}

impl Default for OutputFormats {
    fn default() -> Self {
        let mut set = BTreeSet::new();
        set.insert(OutputFormat::Raw);
        OutputFormats(set)
    }
}

impl fmt::Display for OutputFormats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(|k| k.to_string()).collect();
        write!(f, "{}", names.join(","))
    }
}

/// Parses a comma-separated list of output formats (e.g. `raw,csv`).
/// Accepts `all` as shorthand for every format. Used as a clap value
/// parser, hence the `String` error type.
pub fn parse_output_formats(input: &str) -> Result<OutputFormats, String> {
    if input.trim().is_empty() {
        return Err("output formats cannot be empty".to_string());
    }

    let mut set = BTreeSet::new();
    for segment in input.split(',') {
        let segment = segment.trim().to_lowercase();
        if segment.is_empty() {
            return Err("empty segment in output formats".to_string());
        }
        match segment.as_str() {
            "raw" => {
                set.insert(OutputFormat::Raw);
            }
            "csv" => {
                set.insert(OutputFormat::Csv);
            }
            "xspf" => {
                set.insert(OutputFormat::Xspf);
            }
            "all" => {
                set.extend(OutputFormat::ALL);
            }
            other => {
                return Err(format!("invalid value '{}' for output format", other));
            }
        }
    }

    Ok(OutputFormats(set))
}
