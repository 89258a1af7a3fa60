use std::fmt;

use serde::{Deserialize, Serialize};

use super::{null_as_default, string_or_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialCategory {
    Assignment,
    Lab,
    Lecture,
    Reference,
    Assessment,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MaterialCategory {
    /// Icon shown next to the material in the lesson outline.
    pub fn icon(self) -> &'static str {
        match self {
            MaterialCategory::Assignment => "list.bullet.clipboard",
            MaterialCategory::Lab => "flask.fill",
            MaterialCategory::Lecture => "rectangle.and.pencil.and.ellipsis",
            MaterialCategory::Reference => "book",
            MaterialCategory::Assessment => "doc.text",
            MaterialCategory::Unknown => "doc",
        }
    }
}

/// Selects the renderer for a material. Values the client does not know are
/// kept verbatim so they can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Video,
    Image,
    Text,
    Audio,
    Document,
    Other(String),
}

impl Default for ContentType {
    fn default() -> Self {
        ContentType::Other(String::new())
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "VIDEO" => ContentType::Video,
            "IMAGE" => ContentType::Image,
            "TEXT" => ContentType::Text,
            "AUDIO" => ContentType::Audio,
            "DOCUMENT" => ContentType::Document,
            _ => ContentType::Other(value),
        }
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Video => f.write_str("VIDEO"),
            ContentType::Image => f.write_str("IMAGE"),
            ContentType::Text => f.write_str("TEXT"),
            ContentType::Audio => f.write_str("AUDIO"),
            ContentType::Document => f.write_str("DOCUMENT"),
            ContentType::Other(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub material_uid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: MaterialCategory,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_num: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Minutes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_duration: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_type: ContentType,
    /// URL or HTML body, depending on `content_type`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
}
