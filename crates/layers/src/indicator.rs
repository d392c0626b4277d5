/// Shared loading/error indicator mirroring the map's status control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IndicatorState {
    #[default]
    Hidden,
    Loading(String),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct StatusIndicator {
    state: IndicatorState,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &IndicatorState {
        &self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.state == IndicatorState::Hidden
    }

    pub fn show_loading(&mut self, text: impl Into<String>) {
        self.state = IndicatorState::Loading(text.into());
    }

    pub fn show_error(&mut self, text: impl Into<String>) {
        self.state = IndicatorState::Error(text.into());
    }

    pub fn hide(&mut self) {
        self.state = IndicatorState::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::{IndicatorState, StatusIndicator};

    #[test]
    fn transitions() {
        let mut indicator = StatusIndicator::new();
        assert!(indicator.is_hidden());

        indicator.show_loading("Processing");
        assert_eq!(
            *indicator.state(),
            IndicatorState::Loading("Processing".to_string())
        );

        indicator.show_error("Unable to display priorities");
        assert_eq!(
            *indicator.state(),
            IndicatorState::Error("Unable to display priorities".to_string())
        );

        indicator.hide();
        assert!(indicator.is_hidden());
    }
}
