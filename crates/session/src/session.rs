//! The modeling session: one long-lived task that owns all parameter state
//! and drives the overlay request pipeline.
//!
//! Events are applied to the state the moment they arrive, so nothing from a
//! burst is lost; acting on the new state (building URLs, issuing requests)
//! is what gets debounced. A burst of slider drags therefore collapses into
//! a single request for the final state.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use foundation::LatLngBounds;
use layers::{
    IndicatorState, LegendEntry, OverlayController, StatusIndicator, ThresholdSlider, TileSurface,
    legend_entries, opacity_from_transparency,
};
use model::{ParameterSnapshot, Polarity, VariableId, effective_weight};
use runtime::{ParameterBus, ParameterEvent, debounce};
use streaming::{
    Accepted, BoundaryMasks, BoundaryService, Breaks, BreaksPipeline, BreaksService, FetchResult,
    ServiceError, Submission, breaks_url, tile_url,
};

use crate::config::SessionConfig;
use crate::notice::Notice;

/// The preset-shaped view of the current state: active variables with their
/// signed weights. What the preset radio group renders against.
pub type PresetProjection = BTreeMap<VariableId, i32>;

/// Published preset state: the projection plus the catalog preset it
/// exactly matches, if any, so hosts never re-derive the match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetSelection {
    pub id: Option<&'static str>,
    pub weights: PresetProjection,
}

/// Tile-loading progress reported back by the host's map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    TilesLoading,
    TilesLoaded,
}

const PROCESSING_TEXT: &str = "Processing";
const LOADING_TILES_TEXT: &str = "Loading tiles";
const BREAKS_FAILED_TEXT: &str = "Unable to display priorities";

/// The host's side of a running session.
pub struct SessionHandle {
    /// Producer end of the parameter stream. Clone it per UI control.
    pub events: ParameterBus,
    surface_tx: mpsc::UnboundedSender<SurfaceEvent>,
    pub preset_changes: watch::Receiver<PresetSelection>,
    pub legend_changes: watch::Receiver<Vec<LegendEntry>>,
    pub indicator_changes: watch::Receiver<IndicatorState>,
    /// Last reconciled parameter state, for the host's persistence boundary
    /// (export with `ParameterSnapshot::to_json_map`).
    pub snapshot_changes: watch::Receiver<ParameterSnapshot>,
    pub notices: mpsc::UnboundedReceiver<Notice>,
}

impl SessionHandle {
    /// Apply a named preset; re-enters the stream as a synthetic change
    /// event like any other control.
    pub fn set_preset(&self, id: impl Into<String>) {
        self.events.push(ParameterEvent::PresetApplied { id: id.into() });
    }

    /// The map widget started loading overlay tiles.
    pub fn tiles_loading(&self) {
        let _ = self.surface_tx.send(SurfaceEvent::TilesLoading);
    }

    /// The map widget finished loading overlay tiles.
    pub fn tiles_loaded(&self) {
        let _ = self.surface_tx.send(SurfaceEvent::TilesLoaded);
    }
}

struct BoundaryOutcome {
    code: String,
    outcome: Result<streaming::BoundaryInfo, ServiceError>,
}

pub struct ModelingSession<S> {
    config: SessionConfig,
    snapshot: ParameterSnapshot,
    bounds: LatLngBounds,
    /// Unsigned importance per variable, kept separately so flipping the
    /// polarity control preserves the magnitude (and vice versa).
    magnitudes: BTreeMap<VariableId, i32>,
    polarities: BTreeMap<VariableId, Polarity>,
    boundary_masks: BoundaryMasks,
    boundary_service: Arc<dyn BoundaryService>,
    pipeline: BreaksPipeline,
    threshold: ThresholdSlider,
    overlay: OverlayController<S>,
    indicator: StatusIndicator,
    events_rx: mpsc::UnboundedReceiver<ParameterEvent>,
    fetch_rx: mpsc::UnboundedReceiver<FetchResult>,
    boundary_tx: mpsc::UnboundedSender<BoundaryOutcome>,
    boundary_rx: mpsc::UnboundedReceiver<BoundaryOutcome>,
    surface_rx: mpsc::UnboundedReceiver<SurfaceEvent>,
    preset_tx: watch::Sender<PresetSelection>,
    legend_tx: watch::Sender<Vec<LegendEntry>>,
    indicator_tx: watch::Sender<IndicatorState>,
    snapshot_tx: watch::Sender<ParameterSnapshot>,
    notices_tx: mpsc::UnboundedSender<Notice>,
}

impl<S: TileSurface> ModelingSession<S> {
    pub fn new(
        config: SessionConfig,
        breaks: Arc<dyn BreaksService>,
        boundaries: Arc<dyn BoundaryService>,
        surface: S,
    ) -> (Self, SessionHandle) {
        let (bus, events_rx) = ParameterBus::channel();
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let (boundary_tx, boundary_rx) = mpsc::unbounded_channel();
        let (surface_tx, surface_rx) = mpsc::unbounded_channel();
        let (preset_tx, preset_changes) = watch::channel(PresetSelection::default());
        let (legend_tx, legend_changes) = watch::channel(Vec::new());
        let (indicator_tx, indicator_changes) = watch::channel(IndicatorState::Hidden);
        let (snapshot_tx, snapshot_changes) =
            watch::channel(config.snapshot.clone().unwrap_or_default());
        let (notices_tx, notices) = mpsc::unbounded_channel();

        let threshold = ThresholdSlider::new();
        let mut snapshot = ParameterSnapshot::default();
        snapshot.priority_threshold = threshold.value();

        let boundary_masks = BoundaryMasks::new(
            config.endpoints.boundary_url.clone(),
            config.bounds.to_bbox_string(),
        );
        let bounds = config.bounds;

        let session = Self {
            config,
            snapshot,
            bounds,
            magnitudes: BTreeMap::new(),
            polarities: BTreeMap::new(),
            boundary_masks,
            boundary_service: boundaries,
            pipeline: BreaksPipeline::new(breaks, fetch_tx),
            threshold,
            overlay: OverlayController::new(surface),
            indicator: StatusIndicator::new(),
            events_rx,
            fetch_rx,
            boundary_tx,
            boundary_rx,
            surface_rx,
            preset_tx,
            legend_tx,
            indicator_tx,
            snapshot_tx,
            notices_tx,
        };
        let handle = SessionHandle {
            events: bus,
            surface_tx,
            preset_changes,
            legend_changes,
            indicator_changes,
            snapshot_changes,
            notices,
        };
        (session, handle)
    }

    /// Drive the session until every event producer is gone.
    pub async fn run(mut self) {
        let (dirty_tx, dirty_rx) = mpsc::unbounded_channel();
        let mut ticks = debounce(dirty_rx, self.config.debounce);

        if let Some(initial) = self.config.snapshot.take() {
            self.install_snapshot(initial);
            let _ = dirty_tx.send(());
        }
        if let Some(id) = self.config.preset.clone() {
            if self.apply_event(ParameterEvent::PresetApplied { id }) {
                let _ = dirty_tx.send(());
            }
        }

        // The surface channel may close early (a host that never reports
        // tile progress); stop polling it then instead of spinning on None.
        let mut surface_closed = false;
        loop {
            tokio::select! {
                event = self.events_rx.recv() => match event {
                    Some(event) => {
                        if self.apply_event(event) {
                            let _ = dirty_tx.send(());
                        }
                    }
                    None => break,
                },
                Some(()) = ticks.recv() => self.reconcile(),
                Some(result) = self.fetch_rx.recv() => self.on_fetch(result),
                Some(outcome) = self.boundary_rx.recv() => {
                    if self.on_boundary(outcome) {
                        let _ = dirty_tx.send(());
                    }
                }
                event = self.surface_rx.recv(), if !surface_closed => match event {
                    Some(event) => self.on_surface(event),
                    None => surface_closed = true,
                },
            }
        }
    }

    /// Fold one event into the session state. Returns whether the change
    /// calls for a (debounced) reconciliation against the services.
    fn apply_event(&mut self, event: ParameterEvent) -> bool {
        let affects_model = match event {
            ParameterEvent::VariableToggled { source, active } => {
                if active {
                    if !self.snapshot.active_variables.contains(&source) {
                        self.snapshot.active_variables.push(source);
                    }
                } else {
                    self.snapshot.active_variables.retain(|v| v != &source);
                }
                true
            }
            ParameterEvent::WeightChanged { source, magnitude } => {
                self.magnitudes.insert(source.clone(), magnitude);
                self.store_effective_weight(&source);
                true
            }
            ParameterEvent::PolarityChanged { source, polarity } => {
                self.polarities.insert(source.clone(), polarity);
                self.store_effective_weight(&source);
                true
            }
            ParameterEvent::CategoryWeightChanged { category, weight } => {
                self.snapshot.weights.categories.insert(category, weight);
                true
            }
            ParameterEvent::ThresholdMoved { position } => {
                self.threshold.set_value(position);
                self.snapshot.priority_threshold = self.threshold.value();
                true
            }
            ParameterEvent::TransparencyChanged { percent } => {
                // Opacity is client-side: applied to the existing overlay
                // directly, never through the request pipeline.
                self.snapshot.transparency = percent.min(100);
                self.overlay
                    .set_opacity(opacity_from_transparency(self.snapshot.transparency));
                false
            }
            ParameterEvent::RasterMaskChanged { source, checked } => {
                let all = catalog::class_names(&source);
                let complete = !all.is_empty()
                    && checked.len() == all.len()
                    && all.iter().all(|name| checked.iter().any(|c| c == name));
                if complete {
                    // Everything checked reads as "no mask".
                    self.snapshot.masks.variables.remove(&source);
                } else {
                    self.snapshot.masks.variables.insert(source, checked);
                }
                true
            }
            ParameterEvent::BoundaryAdd { code } => {
                self.start_boundary_lookup(code);
                false
            }
            ParameterEvent::BoundaryRemove { id } => {
                self.boundary_masks.remove_id(&id);
                self.snapshot.masks.boundary_ids = self.boundary_masks.chosen_ids().to_vec();
                true
            }
            ParameterEvent::BoundsChanged(bounds) => {
                // The old overlay and chosen zip codes are stale for the new
                // area; tear them down right away rather than after the
                // debounce window.
                self.bounds = bounds;
                self.overlay.remove();
                self.boundary_masks.set_bbox(bounds.to_bbox_string());
                self.snapshot.masks.boundary_ids.clear();
                true
            }
            ParameterEvent::PresetApplied { id } => {
                let fragment = catalog::presets::get(&id);
                if fragment.is_empty() {
                    debug!(preset = %id, "unknown preset ignored");
                    false
                } else {
                    self.snapshot.apply_fragment(&fragment);
                    for (variable, weight) in &fragment.variables {
                        self.magnitudes.insert(variable.clone(), weight.abs());
                        self.polarities
                            .insert(variable.clone(), Polarity::from_sign(*weight));
                    }
                    true
                }
            }
        };
        if affects_model {
            self.publish_legend();
        }
        affects_model
    }

    /// Adopt a restored snapshot, rebuilding the per-control state the
    /// snapshot's signed weights imply.
    fn install_snapshot(&mut self, snapshot: ParameterSnapshot) {
        for (variable, weight) in &snapshot.weights.variables {
            self.magnitudes.insert(variable.clone(), weight.abs());
            self.polarities
                .insert(variable.clone(), Polarity::from_sign(*weight));
        }
        self.boundary_masks
            .set_chosen_ids(snapshot.masks.boundary_ids.clone());
        self.threshold.set_value(snapshot.priority_threshold);
        self.snapshot = snapshot;
        self.snapshot.priority_threshold = self.threshold.value();
        self.publish_legend();
    }

    fn store_effective_weight(&mut self, source: &VariableId) {
        let magnitude = self.magnitudes.get(source).copied().unwrap_or(0);
        let polarity = self
            .polarities
            .get(source)
            .copied()
            .unwrap_or(Polarity::More);
        self.snapshot
            .weights
            .variables
            .insert(source.clone(), effective_weight(magnitude, polarity));
    }

    /// Act on the current state: publish projections and line up the breaks
    /// request the overlay needs. Runs once per debounced burst.
    fn reconcile(&mut self) {
        self.publish_preset();
        self.snapshot_tx.send_replace(self.snapshot.clone());
        match breaks_url(
            &self.config.endpoints.breaks_url,
            &self.snapshot,
            &self.bounds,
            self.config.num_breaks,
        ) {
            None => {
                // Nothing to model with; there must be no overlay either.
                self.overlay.remove();
            }
            Some(url) => match self.pipeline.submit(&url) {
                Submission::Cached(breaks) => {
                    // A memo hit may land while the indicator shows for an
                    // aborted request; cached resolution is a success too.
                    self.hide_indicator();
                    self.apply_breaks(breaks);
                }
                Submission::Pending => {
                    debug!(%url, "breaks request in flight");
                    self.set_loading(PROCESSING_TEXT);
                }
            },
        }
    }

    fn on_fetch(&mut self, result: FetchResult) {
        match self.pipeline.accept(result) {
            Accepted::Superseded => debug!("dropping superseded breaks response"),
            Accepted::Resolved(Ok(breaks)) => {
                self.hide_indicator();
                self.apply_breaks(breaks);
            }
            Accepted::Resolved(Err(err)) => {
                warn!(%err, "breaks request failed");
                self.set_error(BREAKS_FAILED_TEXT);
            }
        }
    }

    /// Turn resolved breaks into the visible overlay.
    fn apply_breaks(&mut self, breaks: Breaks) {
        if self.threshold.sync_breaks(breaks.len()) {
            self.snapshot.priority_threshold = self.threshold.value();
        }
        let threshold = self.threshold.threshold(&breaks);
        if let Some(url) = tile_url(
            &self.config.endpoints.tile_url,
            &self.snapshot,
            &self.bounds,
            &breaks,
            threshold,
        ) {
            let opacity = opacity_from_transparency(self.snapshot.transparency);
            self.overlay.show(&url, opacity);
        }
    }

    fn start_boundary_lookup(&self, code: String) {
        let service = Arc::clone(&self.boundary_service);
        let url = self.boundary_masks.lookup_url(&code);
        let tx = self.boundary_tx.clone();
        tokio::spawn(async move {
            let outcome = service.lookup_boundary(&url).await;
            let _ = tx.send(BoundaryOutcome { code, outcome });
        });
    }

    /// Fold a finished boundary lookup back in. Returns whether the mask
    /// changed (and a reconciliation is due).
    fn on_boundary(&mut self, outcome: BoundaryOutcome) -> bool {
        match outcome.outcome {
            Ok(info) => {
                self.boundary_masks.push_id(info.id.clone());
                self.snapshot.masks.boundary_ids = self.boundary_masks.chosen_ids().to_vec();
                let _ = self.notices_tx.send(Notice::BoundaryAdded(info.id));
                true
            }
            Err(err) => {
                warn!(code = %outcome.code, %err, "boundary lookup failed");
                let _ = self.notices_tx.send(Notice::BoundaryLookupFailed {
                    code: outcome.code,
                    message: err.server_text(),
                });
                false
            }
        }
    }

    fn on_surface(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::TilesLoading => self.set_loading(LOADING_TILES_TEXT),
            SurfaceEvent::TilesLoaded => self.hide_indicator(),
        }
    }

    fn publish_preset(&mut self) {
        self.preset_tx.send_replace(PresetSelection {
            id: catalog::presets::match_snapshot(&self.snapshot),
            weights: self.snapshot.to_preset(),
        });
    }

    fn publish_legend(&mut self) {
        self.legend_tx.send_replace(legend_entries(&self.snapshot));
    }

    fn set_loading(&mut self, text: &str) {
        self.indicator.show_loading(text);
        self.indicator_tx.send_replace(self.indicator.state().clone());
    }

    fn set_error(&mut self, text: &str) {
        self.indicator.show_error(text);
        self.indicator_tx.send_replace(self.indicator.state().clone());
    }

    fn hide_indicator(&mut self) {
        self.indicator.hide();
        self.indicator_tx.send_replace(IndicatorState::Hidden);
    }
}
