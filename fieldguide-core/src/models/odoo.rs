//! Decoding helpers for Odoo's JSON conventions.

use serde::{Deserialize, Deserializer};

/// Odoo sends `false` where other APIs would send `null`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FalseOr<T> {
    Value(T),
    False(#[allow(dead_code)] bool),
}

/// Decodes `false`, `null` or a missing field as `None`.
pub(crate) fn false_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<FalseOr<T>>::deserialize(deserializer)? {
        Some(FalseOr::Value(value)) => Some(value),
        Some(FalseOr::False(_)) | None => None,
    })
}

/// Decodes `false` or `null` as an empty string.
pub(crate) fn false_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    false_as_none::<D, String>(deserializer).map(Option::unwrap_or_default)
}

/// Decodes `false` or `null` as `T::default()`.
///
/// Used for nested records, numbers and lists, which Odoo blanks out with
/// `false` when the related record is missing.
pub(crate) fn false_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    false_as_none::<D, T>(deserializer).map(Option::unwrap_or_default)
}
