use serde::{Deserialize, Serialize};

use super::{Material, User, null_as_default, string_or_number};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    /// Percentage, 0-100.
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_weeks: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_published: String,
    #[serde(default)]
    pub creator: Option<User>,
    #[serde(default)]
    pub instructor: Option<User>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prerequisites: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discounted_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    /// Populated only by the assembler.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
}

impl Course {
    /// Sum of all section durations, or `None` before assembly.
    pub fn total_duration(&self) -> Option<u32> {
        self.sections
            .as_ref()
            .map(|sections| sections.iter().map(|s| s.duration).sum())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub section_id: String,
    pub section_name: String,
    pub order_number: i64,
    /// Minutes, derived from the materials.
    pub duration: u32,
    pub course_materials: Vec<Material>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_by: String,
}
