use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier sent by the admin API as either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match IdRepr::deserialize(deserializer)? {
            IdRepr::Int(i) => Self::from(i),
            IdRepr::Float(f) => Self(f.to_string()),
            IdRepr::Text(s) => Self::new(s),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Accepts a JSON number or a numeric string; anything else reads as absent.
///
/// # Errors
///
/// Only fails when the underlying deserializer fails.
pub fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let parsed = match Option::<NumberRepr>::deserialize(deserializer)? {
        Some(NumberRepr::Number(n)) => Some(n),
        Some(NumberRepr::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Some(NumberRepr::Other(_)) | None => None,
    };
    Ok(parsed)
}

/// Like [`lenient_number`], for fields that only make sense as whole numbers.
///
/// # Errors
///
/// Only fails when the underlying deserializer fails.
pub fn lenient_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    #[allow(clippy::cast_possible_truncation)]
    let parsed = lenient_number(deserializer)?
        .filter(|n| n.fract() == 0.0 && n.abs() < 9.0e15)
        .map(|n| n as i64);
    Ok(parsed)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Text(String),
    Number(serde_json::Number),
    Other(IgnoredAny),
}

/// Display text that may arrive as a string or a number. Anything else reads as absent.
///
/// # Errors
///
/// Only fails when the underlying deserializer fails.
pub fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let parsed = match Option::<TextRepr>::deserialize(deserializer)? {
        Some(TextRepr::Text(s)) => Some(s),
        Some(TextRepr::Number(n)) => Some(n.to_string()),
        Some(TextRepr::Other(_)) | None => None,
    };
    Ok(parsed)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Other(IgnoredAny),
}

/// Reads `T` when the value has its shape and absent otherwise.
///
/// # Errors
///
/// Only fails when the underlying deserializer fails.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<Lenient<T>>::deserialize(deserializer)? {
        Some(Lenient::Value(v)) => Some(v),
        Some(Lenient::Other(_)) | None => None,
    })
}
