use model::ParameterSnapshot;

/// One legend row: an active variable with its display labels and the
/// effective signed weight it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub source: String,
    pub title: String,
    pub less: String,
    pub more: String,
    pub weight: i32,
}

/// Legend rows for the snapshot's active variables, in UI order.
///
/// Sources missing from the variable catalog (old saved plans) fall back to
/// the raw source id so the row still renders.
pub fn legend_entries(snapshot: &ParameterSnapshot) -> Vec<LegendEntry> {
    let weights = snapshot.active_weights();
    snapshot
        .active_variables
        .iter()
        .map(|source| {
            let weight = weights.get(source).copied().unwrap_or(0);
            match catalog::variable(source) {
                Some(v) => LegendEntry {
                    source: source.clone(),
                    title: v.title.to_string(),
                    less: v.less.to_string(),
                    more: v.more.to_string(),
                    weight,
                },
                None => LegendEntry {
                    source: source.clone(),
                    title: source.clone(),
                    less: String::new(),
                    more: String::new(),
                    weight,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use model::ParameterSnapshot;

    use super::legend_entries;

    #[test]
    fn entries_follow_active_order_and_weights() {
        let mut s = ParameterSnapshot::default();
        s.active_variables
            .push("nlcd-2011-canopy-tms-epsg3857".to_string());
        s.active_variables
            .push("us-census-population-density-30m-epsg3857".to_string());
        s.weights
            .variables
            .insert("nlcd-2011-canopy-tms-epsg3857".to_string(), -2);

        let entries = legend_entries(&s);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Percent Tree Canopy Coverage");
        assert_eq!(entries[0].weight, -2);
        // Weight control never touched: contributes zero.
        assert_eq!(entries[1].title, "Population Density");
        assert_eq!(entries[1].weight, 0);
    }

    #[test]
    fn unknown_sources_fall_back_to_the_raw_id() {
        let mut s = ParameterSnapshot::default();
        s.active_variables.push("retired-layer".to_string());
        let entries = legend_entries(&s);
        assert_eq!(entries[0].title, "retired-layer");
        assert_eq!(entries[0].less, "");
    }

    #[test]
    fn inactive_snapshot_has_no_entries() {
        assert!(legend_entries(&ParameterSnapshot::default()).is_empty());
    }
}
