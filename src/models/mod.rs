pub mod course;
pub mod material;
pub mod user;

pub use course::{Course, Section, Tag};
pub use material::{ContentType, Material, MaterialCategory};
pub use user::User;

use serde::{Deserialize, Deserializer};

/// Upstream ids arrive as JSON strings or numbers depending on the endpoint.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Like `Option::unwrap_or_default`, but for explicit JSON nulls.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer part of a JSON number. Fractions are truncated; anything that is
/// not a finite number yields `None`.
fn whole_number(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        _ => None,
    }
}

/// Minutes as sent upstream. `null` stays `None`; fractions are truncated and
/// negative or malformed values become 0.
pub(crate) fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        value => Ok(Some(
            whole_number(&value).map_or(0, |n| n.clamp(0, i64::from(u32::MAX)) as u32),
        )),
    }
}

/// Sort key as sent upstream; malformed values sort as 0.
pub(crate) fn lenient_order<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(whole_number(&value).unwrap_or(0))
}

pub(crate) fn lenient_order_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(whole_number(&value))
}
