//! Wire types for the classification and boundary-lookup services.

use serde::{Deserialize, Serialize};

/// Ascending class boundaries of the combined weighted raster, one per
/// percentile bucket (`numBreaks` of them).
pub type Breaks = Vec<f64>;

/// Response body of the breaks endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBreaksResponse {
    #[serde(rename = "classBreaks")]
    pub class_breaks: Breaks,
}

/// Boundary object returned by the zip-code lookup endpoint.
///
/// Servers have been seen returning the id both as a string and as a bare
/// number; normalize to a string either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "boundary id must be a string or number, got {other}"
        ))),
    }
}
