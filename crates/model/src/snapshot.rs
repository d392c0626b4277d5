use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type VariableId = String;
pub type CategoryId = String;
pub type BoundaryId = String;
pub type ClassName = String;

/// Signed weights as the modeling service consumes them: magnitude is
/// importance, sign is polarity.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default)]
    pub categories: BTreeMap<CategoryId, i32>,
    #[serde(default)]
    pub variables: BTreeMap<VariableId, i32>,
}

/// Raster-class and area-of-interest restrictions.
///
/// A variable absent from `variables` means all of its classes are included.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Masks {
    #[serde(default)]
    pub variables: BTreeMap<VariableId, Vec<ClassName>>,
    #[serde(default, rename = "boundaryIds")]
    pub boundary_ids: Vec<BoundaryId>,
}

/// Canonical value object for every user-selected modeling parameter.
///
/// Re-derived on each change and handed through the request pipeline; it is
/// never mutated behind the session's back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSnapshot {
    pub priority_threshold: u32,
    pub transparency: u32,
    pub active_variables: Vec<VariableId>,
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub masks: Masks,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self {
            // Rightmost slider position: show all values, no threshold.
            priority_threshold: 10,
            transparency: 0,
            active_variables: Vec::new(),
            weights: Weights::default(),
            masks: Masks::default(),
        }
    }
}

/// The preset-shaped slice of a snapshot: active variables plus their
/// signed weights. Also what `set_preset` merges back in.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetFragment {
    pub active_variables: Vec<VariableId>,
    pub variables: BTreeMap<VariableId, i32>,
}

impl PresetFragment {
    pub fn is_empty(&self) -> bool {
        self.active_variables.is_empty() && self.variables.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotParseError {
    pub message: String,
}

impl std::fmt::Display for SnapshotParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed parameter snapshot: {}", self.message)
    }
}

impl std::error::Error for SnapshotParseError {}

impl ParameterSnapshot {
    /// Signed weight of each active variable, defaulting to 0 when a weight
    /// control has never been touched.
    pub fn active_weights(&self) -> BTreeMap<VariableId, i32> {
        self.active_variables
            .iter()
            .map(|v| (v.clone(), self.weights.variables.get(v).copied().unwrap_or(0)))
            .collect()
    }

    /// Project the snapshot down to its preset shape for upward publication.
    pub fn to_preset(&self) -> BTreeMap<VariableId, i32> {
        self.active_weights()
    }

    /// One-way merge of a preset fragment: the fragment's variables become
    /// the active set and their weights overwrite matching keys. Masks,
    /// threshold and transparency are left alone.
    pub fn apply_fragment(&mut self, fragment: &PresetFragment) {
        if fragment.is_empty() {
            return;
        }
        self.active_variables = fragment.active_variables.clone();
        for (variable, weight) in &fragment.variables {
            self.weights.variables.insert(variable.clone(), *weight);
        }
    }

    /// Export as a plain string-keyed structure for the host's persistence
    /// boundary (query string, saved plans).
    pub fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }

    pub fn from_json_map(
        map: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, SnapshotParseError> {
        serde_json::from_value(serde_json::Value::Object(map)).map_err(|e| SnapshotParseError {
            message: e.to_string(),
        })
    }
}
