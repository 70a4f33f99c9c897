//! Typed view of the JSON payload describing one KYC submission.
//!
//! Everything except the top-level object shape is optional. Values of the wrong
//! type are treated like missing values instead of failing the load, so that a
//! partially filled submission still produces a document.

use std::fs;
use std::path::Path;

use log::debug;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::defaults;
use crate::error::{Error, Result};

/// Root of the input document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Payload {
    #[serde(default, deserialize_with = "lenient")]
    pub branding: Branding,
    #[serde(default, deserialize_with = "lenient")]
    pub schema: Schema,
    #[serde(default, deserialize_with = "lenient")]
    pub data: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub language: Option<String>,
    #[serde(default)]
    pub investor_name: Value,
    #[serde(default)]
    pub submission_id: Value,
    #[serde(default)]
    pub template_name: Value,
    #[serde(default)]
    pub generated_at: Value,
}

impl Payload {
    /// Reads and parses the payload stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parses a payload from JSON text. The document must be a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Builds a payload from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(serde_json::Error::custom("payload must be a JSON object").into());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Language code used for title and label lookups.
    pub fn language(&self) -> &str {
        defaults::resolve_with_default(self.language.as_deref(), defaults::LANGUAGE, |_| true)
    }
}

/// Optional presentation settings.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Branding {
    #[serde(default, deserialize_with = "lenient")]
    pub font_path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub logo_path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub header_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub footer_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub primary_color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub signatures: Vec<Signature>,
}

/// One signature line at the end of the document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub label: Value,
    #[serde(default)]
    pub name: Value,
}

/// Ordered description of the submitted form.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Schema {
    #[serde(default, deserialize_with = "lenient")]
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default, deserialize_with = "lenient")]
    pub fields: Vec<Field>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub key: Value,
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub label: LocalizedText,
}

impl Field {
    /// Key used to look the field up in [`Payload::data`]; `key` wins over `id`.
    pub fn lookup_key(&self) -> Option<&str> {
        [&self.key, &self.id]
            .into_iter()
            .filter_map(Value::as_str)
            .find(|key| !key.is_empty())
    }

    /// Resolves the submitted value for this field.
    pub fn value<'a>(&self, data: &'a Map<String, Value>) -> FieldValue<'a> {
        FieldValue::lookup(data, self.lookup_key())
    }
}

/// A title or label that is either plain text or keyed by language code.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Localized(Map<String, Value>),
    Plain(Value),
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Localized(Map::new())
    }
}

impl LocalizedText {
    /// Returns the text for `language`.
    ///
    /// Mappings without an entry for `language` resolve to an empty string; there is
    /// no fallback to another language. Plain values ignore `language`.
    pub fn resolve(&self, language: &str) -> String {
        match self {
            LocalizedText::Localized(translations) => translations
                .get(language)
                .map(render_text)
                .unwrap_or_default(),
            LocalizedText::Plain(value) => render_text(value),
        }
    }
}

/// Submitted answer for one field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Absent,
    Scalar(&'a Value),
    Sequence(&'a [Value]),
}

impl<'a> FieldValue<'a> {
    pub fn lookup(data: &'a Map<String, Value>, key: Option<&str>) -> Self {
        match key.and_then(|key| data.get(key)) {
            None | Some(Value::Null) => FieldValue::Absent,
            Some(Value::Array(items)) => FieldValue::Sequence(items),
            Some(value) => FieldValue::Scalar(value),
        }
    }

    /// Cell text for the value; anything that stringifies to nothing becomes `-`.
    pub fn display(&self) -> String {
        let text = match self {
            FieldValue::Absent => String::new(),
            FieldValue::Scalar(value) => render_text(value),
            FieldValue::Sequence(items) => join_values(items),
        };
        defaults::resolve_with_default(Some(text), defaults::EMPTY_VALUE.to_owned(), |text| {
            !text.is_empty()
        })
    }
}

/// Converts any JSON value into display text.
///
/// `null` becomes an empty string, strings are used verbatim, booleans print as
/// `True`/`False`, sequences are joined with `", "` and objects fall back to their
/// compact JSON form.
pub fn render_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_owned(),
        Value::Bool(false) => "False".to_owned(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) => join_values(items),
        Value::Object(_) => value.to_string(),
    }
}

fn join_values(items: &[Value]) -> String {
    items.iter().map(render_text).collect::<Vec<_>>().join(", ")
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        debug!("Ignoring payload value of unexpected shape: {err}");
        T::default()
    }))
}
