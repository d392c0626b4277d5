/// Seam to the external map widget that actually renders tiles.
///
/// The widget owns at most one priority overlay; these calls mirror the
/// widget's own layer operations and are assumed cheap and synchronous.
pub trait TileSurface {
    fn add_overlay(&mut self, url: &str, opacity: f64);
    /// Re-point the existing overlay at a new tile URL in place.
    fn set_overlay_url(&mut self, url: &str);
    fn set_overlay_opacity(&mut self, opacity: f64);
    fn remove_overlay(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayState {
    Absent,
    Present { url: String, opacity: f64 },
}

/// Owner of the single active tile overlay.
///
/// Re-pointing an existing overlay (rather than removing and re-adding it)
/// avoids a visible flicker while tiles reload.
pub struct OverlayController<S> {
    surface: S,
    state: OverlayState,
}

/// Overlay opacity from the transparency slider percentage.
pub fn opacity_from_transparency(percent: u32) -> f64 {
    1.0 - f64::from(percent.min(100)) / 100.0
}

impl<S: TileSurface> OverlayController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: OverlayState::Absent,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Show the overlay for a resolved tile URL. Creates the layer on first
    /// use; afterwards only the URL is updated and the existing opacity is
    /// left alone.
    pub fn show(&mut self, url: &str, opacity: f64) {
        match &mut self.state {
            OverlayState::Absent => {
                self.surface.add_overlay(url, opacity);
                self.state = OverlayState::Present {
                    url: url.to_string(),
                    opacity,
                };
            }
            OverlayState::Present {
                url: current_url, ..
            } => {
                if current_url != url {
                    self.surface.set_overlay_url(url);
                    *current_url = url.to_string();
                }
            }
        }
    }

    /// Apply an opacity change directly, without touching the request
    /// pipeline or re-fetching tiles.
    pub fn set_opacity(&mut self, opacity: f64) {
        if let OverlayState::Present {
            opacity: current, ..
        } = &mut self.state
        {
            self.surface.set_overlay_opacity(opacity);
            *current = opacity;
        }
    }

    pub fn remove(&mut self) {
        if matches!(self.state, OverlayState::Present { .. }) {
            self.surface.remove_overlay();
        }
        self.state = OverlayState::Absent;
    }
}

#[cfg(test)]
mod tests {
    use super::{OverlayController, OverlayState, TileSurface, opacity_from_transparency};

    #[derive(Default)]
    struct RecordingSurface {
        log: Vec<String>,
    }

    impl TileSurface for RecordingSurface {
        fn add_overlay(&mut self, url: &str, opacity: f64) {
            self.log.push(format!("add {url} @{opacity}"));
        }
        fn set_overlay_url(&mut self, url: &str) {
            self.log.push(format!("seturl {url}"));
        }
        fn set_overlay_opacity(&mut self, opacity: f64) {
            self.log.push(format!("opacity {opacity}"));
        }
        fn remove_overlay(&mut self) {
            self.log.push("remove".to_string());
        }
    }

    #[test]
    fn first_show_creates_then_updates_in_place() {
        let mut c = OverlayController::new(RecordingSurface::default());
        c.show("http://t/1", 1.0);
        c.show("http://t/2", 0.5);
        // Same URL again: nothing to do.
        c.show("http://t/2", 0.5);
        assert_eq!(c.surface().log, vec!["add http://t/1 @1", "seturl http://t/2"]);
        assert_eq!(
            *c.state(),
            OverlayState::Present {
                url: "http://t/2".to_string(),
                opacity: 1.0,
            }
        );
    }

    #[test]
    fn opacity_applies_only_while_present() {
        let mut c = OverlayController::new(RecordingSurface::default());
        c.set_opacity(0.3);
        assert!(c.surface().log.is_empty());

        c.show("http://t/1", 1.0);
        c.set_opacity(0.3);
        assert_eq!(c.surface().log.last().unwrap(), "opacity 0.3");
    }

    #[test]
    fn remove_is_idempotent() {
        let mut c = OverlayController::new(RecordingSurface::default());
        c.remove();
        assert!(c.surface().log.is_empty());

        c.show("http://t/1", 1.0);
        c.remove();
        c.remove();
        assert_eq!(c.surface().log, vec!["add http://t/1 @1", "remove"]);
        assert_eq!(*c.state(), OverlayState::Absent);
    }

    #[test]
    fn transparency_to_opacity() {
        assert_eq!(opacity_from_transparency(0), 1.0);
        assert_eq!(opacity_from_transparency(30), 0.7);
        assert_eq!(opacity_from_transparency(100), 0.0);
        // Out-of-range input saturates.
        assert_eq!(opacity_from_transparency(250), 0.0);
    }
}
