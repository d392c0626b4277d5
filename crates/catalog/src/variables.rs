use serde::Serialize;

/// A weighted input data layer the user can turn on and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariableDescriptor {
    /// Raster source id as the tile services know it.
    pub source: &'static str,
    pub title: &'static str,
    /// Label shown when polarity is "less is higher priority".
    pub less: &'static str,
    /// Label shown when polarity is "more is higher priority".
    pub more: &'static str,
}

const VARIABLES: &[VariableDescriptor] = &[
    VariableDescriptor {
        source: "us-census-population-density-30m-epsg3857",
        title: "Population Density",
        less: "Lower Population Density",
        more: "Higher Population Density",
    },
    VariableDescriptor {
        source: "us-census-housing-vacancy-30m-epsg3857",
        title: "Percent Vacant Housing Units",
        less: "Less Vacant Housing",
        more: "More Vacant Housing",
    },
    VariableDescriptor {
        source: "us-census-property-value-tms-epsg3857",
        title: "Owner-Occupied Property Value",
        less: "Lower Property Values",
        more: "Higher Property Values",
    },
    VariableDescriptor {
        source: "us-census-median-household-income-tms-epsg3857",
        title: "Median Household Income",
        less: "Lower Household Income",
        more: "Higher Household Income",
    },
    VariableDescriptor {
        source: "nlcd-2011-canopy-tms-epsg3857",
        title: "Percent Tree Canopy Coverage",
        less: "Less Tree Canopy Coverage",
        more: "More Tree Canopy Coverage",
    },
    VariableDescriptor {
        source: "nlcd-2011-impervious-tms-epsg3857",
        title: "Percent Impervious Surface",
        less: "Less Impervious Surface",
        more: "More Impervious Surface",
    },
];

// Fixed weight-dropdown magnitudes; anything else is a custom entry.
const WEIGHT_CHOICES: &[i32] = &[0, 1, 2, 3, 4, 5];

pub fn variables() -> &'static [VariableDescriptor] {
    VARIABLES
}

pub fn variable(source: &str) -> Option<&'static VariableDescriptor> {
    VARIABLES.iter().find(|v| v.source == source)
}

pub fn weight_choices() -> &'static [i32] {
    WEIGHT_CHOICES
}

#[cfg(test)]
mod tests {
    use super::{variable, variables};

    #[test]
    fn sources_are_unique() {
        let mut sources: Vec<_> = variables().iter().map(|v| v.source).collect();
        sources.sort_unstable();
        sources.dedup();
        assert_eq!(sources.len(), variables().len());
    }

    #[test]
    fn lookup_by_source() {
        let v = variable("nlcd-2011-canopy-tms-epsg3857").expect("known source");
        assert_eq!(v.title, "Percent Tree Canopy Coverage");
        assert!(variable("unknown").is_none());
    }
}
