use serde::{Deserialize, Serialize};

use crate::models::{
    ContentType, MaterialCategory, lenient_minutes, lenient_order, lenient_order_opt, null_as_default,
    string_or_number,
};

/// Every LMS endpoint wraps its payload as `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageContent<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    #[serde(deserialize_with = "string_or_number")]
    pub section_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section_name: String,
    #[serde(default, deserialize_with = "lenient_order_opt")]
    pub order_number: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_materials: Vec<RawMaterial>,
}

/// Material as served by `/materials/course/{id}`. Its location lives under
/// `url` or `content` depending on the content type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterial {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub material_uid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: MaterialCategory,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_order")]
    pub order_num: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub expected_duration: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_type: ContentType,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
}
