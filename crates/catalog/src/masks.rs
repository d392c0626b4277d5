use serde::Serialize;

/// A named group of raster class codes the user can include or exclude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaskChoice {
    pub name: &'static str,
    pub title: &'static str,
    /// Raster class codes covered by this choice.
    pub values: &'static [u32],
}

/// A raster source that supports class masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaskSource {
    pub source: &'static str,
    pub title: &'static str,
    pub choices: &'static [MaskChoice],
}

// NLCD 2011 land-cover codes, grouped the way the UI presents them.
const MASK_SOURCES: &[MaskSource] = &[MaskSource {
    source: "nlcd-zoomed",
    title: "Land Use",
    choices: &[
        MaskChoice {
            name: "resHi",
            title: "Developed (high density)",
            values: &[24],
        },
        MaskChoice {
            name: "resLo",
            title: "Developed (low/medium density)",
            values: &[22, 23],
        },
        MaskChoice {
            name: "urbanOpen",
            title: "Urban Open",
            values: &[21, 71, 72, 81, 82],
        },
        MaskChoice {
            name: "forest",
            title: "Forest",
            values: &[41, 42, 43, 51, 52, 90, 95],
        },
        MaskChoice {
            name: "other",
            title: "Other",
            values: &[11, 12, 31, 73, 74],
        },
    ],
}];

pub fn mask_sources() -> &'static [MaskSource] {
    MASK_SOURCES
}

pub fn mask_source(source: &str) -> Option<&'static MaskSource> {
    MASK_SOURCES.iter().find(|m| m.source == source)
}

/// Raster class codes for one named choice of a mask source.
pub fn class_values(source: &str, name: &str) -> Option<&'static [u32]> {
    mask_source(source)?
        .choices
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.values)
}

/// All choice names for a mask source, in UI order.
pub fn class_names(source: &str) -> Vec<&'static str> {
    mask_source(source)
        .map(|m| m.choices.iter().map(|c| c.name).collect())
        .unwrap_or_default()
}
