//! Document parsing: YAML front-matter header plus Markdown body.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::{Error, Result};

/// A header value as written in the document, before any kind-specific
/// coercion.
///
/// YAML tags (`!foo bar`) are dropped and their inner value kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HeaderValue {
    /// An explicit `~`/`null`, or a key with no value.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// Integer or float.
    Number(serde_yaml::Number),
    /// Any string scalar.
    String(String),
    /// A YAML sequence.
    List(Vec<HeaderValue>),
    /// A nested mapping. Keys are rendered to their scalar text.
    Mapping(BTreeMap<String, HeaderValue>),
}

impl HeaderValue {
    /// Returns the string scalar, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl From<Value> for HeaderValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Sequence(seq) => Self::List(seq.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .map(|(k, v)| (key_text(k), Self::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => {
                let tagged = *tagged;
                Self::from(tagged.value)
            }
        }
    }
}

fn key_text(key: Value) -> String {
    match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// A parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Header key/value pairs. Empty when there is no header.
    pub metadata: BTreeMap<String, HeaderValue>,
    /// Content after the header, trimmed.
    pub body: String,
    /// Whether a delimited header block was found.
    pub has_header: bool,
}

impl Document {
    /// Coerce the header into a typed shape.
    ///
    /// # Errors
    ///
    /// Returns `Error::YamlParse` if the header does not fit `T`.
    pub fn deserialize_metadata<T: DeserializeOwned>(&self) -> Result<T> {
        let value = serde_yaml::to_value(&self.metadata)?;
        Ok(serde_yaml::from_value(value)?)
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches([' ', '\t', '\r']) == "---"
}

/// Split a leading `---` delimited block from the rest of the text.
///
/// Delimiter lines may carry trailing spaces or tabs and end in LF or CRLF.
/// Returns `None` when the text has no opener, or an opener with no closer.
fn split_header(content: &str) -> Option<(&str, &str)> {
    let (opener, mut rest) = content.split_once('\n')?;
    if !is_delimiter(opener) {
        return None;
    }

    let header_start = opener.len() + 1;
    let mut offset = header_start;
    loop {
        let (line, next) = match rest.split_once('\n') {
            Some((line, next)) => (line, Some(next)),
            None => (rest, None),
        };
        if is_delimiter(line) {
            return Some((&content[header_start..offset], next.unwrap_or("")));
        }
        rest = next?;
        offset += line.len() + 1;
    }
}

/// Parse a document's header block and body.
///
/// Without a header block the metadata is empty and the body is the whole
/// text, trimmed. A leading byte-order mark is ignored.
///
/// # Errors
///
/// Returns `Error::YamlParse` if the header contains invalid YAML, or
/// `Error::InvalidHeader` if it is valid YAML but not a mapping.
pub fn parse_document(raw: &str) -> Result<Document> {
    let content = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some((header, rest)) = split_header(content) else {
        return Ok(Document {
            metadata: BTreeMap::new(),
            body: content.trim().to_string(),
            has_header: false,
        });
    };

    let value: Value = serde_yaml::from_str(header)?;
    let metadata = match HeaderValue::from(value) {
        HeaderValue::Null => BTreeMap::new(),
        HeaderValue::Mapping(map) => map,
        other => {
            return Err(Error::InvalidHeader(format!(
                "expected key/value pairs, found a {}",
                other.type_name()
            )));
        }
    };

    Ok(Document {
        metadata,
        body: rest.trim().to_string(),
        has_header: true,
    })
}
