//! Overlay request construction.
//!
//! Requests are plain URL strings on purpose: the string doubles as the
//! memoization key, and the tile template keeps its literal `{z}/{x}/{y}`
//! placeholders for the external map widget.

use std::collections::BTreeMap;

use foundation::LatLngBounds;
use model::ParameterSnapshot;
use url::form_urlencoded;

pub const DEFAULT_NUM_BREAKS: u32 = 10;

const SRID: u32 = 4326;
const COLOR_RAMP: &str = "blue-to-red";

/// Breaks-endpoint URL for a snapshot, or `None` when no variables are
/// active (the caller must remove any existing overlay instead).
pub fn breaks_url(
    base: &str,
    snapshot: &ParameterSnapshot,
    bounds: &LatLngBounds,
    num_breaks: u32,
) -> Option<String> {
    let mut pairs = common_pairs(snapshot, bounds)?;
    pairs.push(("numBreaks", num_breaks.to_string()));
    Some(with_query(base, &pairs))
}

/// Tile-template URL carrying the resolved breaks and optional threshold.
pub fn tile_url(
    base: &str,
    snapshot: &ParameterSnapshot,
    bounds: &LatLngBounds,
    breaks: &[f64],
    threshold: Option<f64>,
) -> Option<String> {
    let mut pairs = common_pairs(snapshot, bounds)?;
    pairs.push(("colorRamp", COLOR_RAMP.to_string()));
    pairs.push(("breaks", join_numbers(breaks)));
    if let Some(t) = threshold {
        pairs.push(("threshold", format_number(t)));
    }
    Some(with_query(base, &pairs))
}

/// Boundary lookup URL. The bbox rides along unencoded, matching what the
/// lookup service parses.
pub fn boundary_lookup_url(prefix: &str, code: &str, bbox: &str) -> String {
    format!("{}/{}?bbox={}", prefix.trim_end_matches('/'), code, bbox)
}

/// The `layerMask` query value: empty when every raster class is included,
/// otherwise a JSON object mapping each mask source to the numeric class
/// codes that remain checked.
pub fn layer_mask(snapshot: &ParameterSnapshot) -> String {
    if snapshot.masks.variables.is_empty() {
        return String::new();
    }
    let mut mask: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for source in catalog::mask_sources() {
        let values: Vec<u32> = match snapshot.masks.variables.get(source.source) {
            Some(checked) => checked
                .iter()
                .filter_map(|name| catalog::class_values(source.source, name))
                .flatten()
                .copied()
                .collect(),
            // Untouched sources keep all of their classes.
            None => source
                .choices
                .iter()
                .flat_map(|c| c.values)
                .copied()
                .collect(),
        };
        if !values.is_empty() {
            mask.insert(source.source, values);
        }
    }
    serde_json::to_string(&mask).unwrap_or_default()
}

fn common_pairs(
    snapshot: &ParameterSnapshot,
    bounds: &LatLngBounds,
) -> Option<Vec<(&'static str, String)>> {
    if snapshot.active_variables.is_empty() {
        return None;
    }
    let weights = snapshot.active_weights();
    let weight_csv = snapshot
        .active_variables
        .iter()
        .map(|v| weights.get(v).copied().unwrap_or(0).to_string())
        .collect::<Vec<_>>()
        .join(",");
    Some(vec![
        ("bbox", bounds.to_bbox_string()),
        ("srid", SRID.to_string()),
        ("layers", snapshot.active_variables.join(",")),
        ("weights", weight_csv),
        ("layerMask", layer_mask(snapshot)),
        ("zipCodes", snapshot.masks.boundary_ids.join(",")),
    ])
}

fn with_query(base: &str, pairs: &[(&'static str, String)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        query.append_pair(key, value);
    }
    format!("{}?{}", base, query.finish())
}

/// Render a break value the way the original service sees them: integral
/// values without a trailing `.0`, keeping cache keys stable.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_number(*v))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use foundation::{LatLng, LatLngBounds};
    use model::ParameterSnapshot;

    use super::{boundary_lookup_url, breaks_url, format_number, layer_mask, tile_url};

    fn bounds() -> LatLngBounds {
        LatLngBounds::new(LatLng::new(44.5, -93.5), LatLng::new(45.25, -92.75))
    }

    fn snapshot() -> ParameterSnapshot {
        let mut s = ParameterSnapshot::default();
        s.active_variables
            .push("us-census-population-density-30m-epsg3857".to_string());
        s.weights.variables.insert(
            "us-census-population-density-30m-epsg3857".to_string(),
            2,
        );
        s
    }

    #[test]
    fn no_active_variables_means_no_request() {
        let s = ParameterSnapshot::default();
        assert_eq!(breaks_url("http://h/breaks", &s, &bounds(), 10), None);
        assert_eq!(tile_url("http://h/tile", &s, &bounds(), &[1.0], None), None);
    }

    #[test]
    fn breaks_url_carries_parameters_in_order() {
        let url = breaks_url("http://h/gt/breaks", &snapshot(), &bounds(), 10).expect("url");
        assert_eq!(
            url,
            "http://h/gt/breaks?bbox=-93.5%2C44.5%2C-92.75%2C45.25&srid=4326\
             &layers=us-census-population-density-30m-epsg3857&weights=2\
             &layerMask=&zipCodes=&numBreaks=10"
        );
    }

    #[test]
    fn identical_snapshots_build_identical_urls() {
        let a = breaks_url("http://h/gt/breaks", &snapshot(), &bounds(), 10);
        let b = breaks_url("http://h/gt/breaks", &snapshot(), &bounds(), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn tile_url_appends_ramp_breaks_and_threshold() {
        let breaks = [10.0, 20.0, 30.5];
        let url = tile_url(
            "http://h/gt/tile/{z}/{x}/{y}.png",
            &snapshot(),
            &bounds(),
            &breaks,
            Some(20.0),
        )
        .expect("url");
        assert!(url.starts_with("http://h/gt/tile/{z}/{x}/{y}.png?bbox="));
        assert!(url.contains("&colorRamp=blue-to-red"));
        assert!(url.contains("&breaks=10%2C20%2C30.5"));
        assert!(url.ends_with("&threshold=20"));

        let no_threshold = tile_url(
            "http://h/gt/tile/{z}/{x}/{y}.png",
            &snapshot(),
            &bounds(),
            &breaks,
            None,
        )
        .expect("url");
        assert!(!no_threshold.contains("threshold"));
    }

    #[test]
    fn zip_codes_join_as_csv() {
        let mut s = snapshot();
        s.masks.boundary_ids = vec!["19123".to_string(), "19124".to_string()];
        let url = breaks_url("http://h/b", &s, &bounds(), 10).expect("url");
        assert!(url.contains("zipCodes=19123%2C19124"));
    }

    #[test]
    fn layer_mask_empty_when_everything_included() {
        assert_eq!(layer_mask(&snapshot()), "");
    }

    #[test]
    fn layer_mask_expands_checked_class_names_to_codes() {
        let mut s = snapshot();
        s.masks.variables.insert(
            "nlcd-zoomed".to_string(),
            vec!["resHi".to_string(), "resLo".to_string()],
        );
        assert_eq!(layer_mask(&s), r#"{"nlcd-zoomed":[24,22,23]}"#);
    }

    #[test]
    fn layer_mask_drops_sources_with_nothing_checked() {
        let mut s = snapshot();
        s.masks.variables.insert("nlcd-zoomed".to_string(), vec![]);
        assert_eq!(layer_mask(&s), "{}");
    }

    #[test]
    fn boundary_url_shape() {
        assert_eq!(
            boundary_lookup_url("http://h/masks/zip-codes/", "19123", "0,0,1,1"),
            "http://h/masks/zip-codes/19123?bbox=0,0,1,1"
        );
    }

    #[test]
    fn numbers_render_like_the_service_expects() {
        assert_eq!(format_number(90.0), "90");
        assert_eq!(format_number(30.5), "30.5");
        assert_eq!(format_number(-2.0), "-2");
    }
}
