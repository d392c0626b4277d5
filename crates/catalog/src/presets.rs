use std::collections::BTreeMap;

use model::{ParameterSnapshot, PresetFragment, VariableId};
use once_cell::sync::Lazy;

/// The closed, build-time catalog of named weight combinations.
static PRESETS: Lazy<BTreeMap<&'static str, BTreeMap<VariableId, i32>>> = Lazy::new(|| {
    fn entry(pairs: &[(&str, i32)]) -> BTreeMap<VariableId, i32> {
        pairs.iter().map(|(v, w)| ((*v).to_string(), *w)).collect()
    }

    BTreeMap::from([
        (
            "high-population-low-canopy",
            entry(&[
                ("us-census-population-density-30m-epsg3857", 2),
                ("nlcd-2011-canopy-tms-epsg3857", -2),
            ]),
        ),
        (
            "low-income-low-vacancy",
            entry(&[
                ("us-census-housing-vacancy-30m-epsg3857", -2),
                ("us-census-median-household-income-tms-epsg3857", -2),
            ]),
        ),
        (
            "low-income-high-impervious",
            entry(&[
                ("us-census-median-household-income-tms-epsg3857", -2),
                ("nlcd-2011-impervious-tms-epsg3857", 2),
            ]),
        ),
    ])
});

pub fn preset_ids() -> Vec<&'static str> {
    PRESETS.keys().copied().collect()
}

/// The parameter fragment for a preset id.
///
/// Unknown ids yield an empty fragment: "no preset selected" is a valid UI
/// state, not an error.
pub fn get(preset_id: &str) -> PresetFragment {
    match PRESETS.get(preset_id) {
        Some(weights) => PresetFragment {
            active_variables: weights.keys().cloned().collect(),
            variables: weights.clone(),
        },
        None => PresetFragment::default(),
    }
}

/// Find the preset whose variable set and weights exactly equal the
/// snapshot's active-variable weights. Display only; never alters state.
pub fn match_snapshot(snapshot: &ParameterSnapshot) -> Option<&'static str> {
    let active = snapshot.active_weights();
    PRESETS
        .iter()
        .find(|(_, weights)| **weights == active)
        .map(|(id, _)| *id)
}
