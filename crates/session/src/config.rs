use std::time::Duration;

use foundation::LatLngBounds;
use model::ParameterSnapshot;

/// Service endpoints the session talks to. The tile URL keeps its literal
/// `{z}/{x}/{y}` placeholders for the map widget.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub breaks_url: String,
    pub tile_url: String,
    pub boundary_url: String,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub endpoints: Endpoints,
    /// Initial visible map area.
    pub bounds: LatLngBounds,
    pub num_breaks: u32,
    /// Quiet period before a burst of parameter changes is acted on.
    pub debounce: Duration,
    /// Preset to apply on startup, if any.
    pub preset: Option<String>,
    /// Previously exported parameters to restore on startup (the host keeps
    /// them in its query string or saved plans).
    pub snapshot: Option<ParameterSnapshot>,
}

impl SessionConfig {
    pub fn new(endpoints: Endpoints, bounds: LatLngBounds) -> Self {
        Self {
            endpoints,
            bounds,
            num_breaks: streaming::DEFAULT_NUM_BREAKS,
            debounce: Duration::from_millis(500),
            preset: None,
            snapshot: None,
        }
    }
}
