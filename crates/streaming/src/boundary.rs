use model::BoundaryId;

use crate::request::boundary_lookup_url;

/// Chosen area-of-interest boundary masks (zip codes) and the bbox they
/// were chosen under.
///
/// A bbox change invalidates every chosen boundary: codes are looked up
/// relative to the visible area, so the old selections no longer apply.
#[derive(Debug, Clone)]
pub struct BoundaryMasks {
    url_prefix: String,
    bbox: String,
    chosen: Vec<BoundaryId>,
}

impl BoundaryMasks {
    pub fn new(url_prefix: impl Into<String>, bbox: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
            bbox: bbox.into(),
            chosen: Vec::new(),
        }
    }

    pub fn lookup_url(&self, code: &str) -> String {
        boundary_lookup_url(&self.url_prefix, code, &self.bbox)
    }

    pub fn chosen_ids(&self) -> &[BoundaryId] {
        &self.chosen
    }

    pub fn push_id(&mut self, id: BoundaryId) {
        self.chosen.push(id);
    }

    /// Remove every occurrence of the id.
    pub fn remove_id(&mut self, id: &str) {
        self.chosen.retain(|c| c != id);
    }

    pub fn set_chosen_ids(&mut self, ids: Vec<BoundaryId>) {
        self.chosen = ids;
    }

    pub fn set_bbox(&mut self, bbox: impl Into<String>) {
        self.bbox = bbox.into();
        self.chosen.clear();
    }
}
