/// Discrete priority-threshold slider, reconciled against the most recently
/// returned class breaks.
///
/// With `num_breaks = 10` the breaks are the 10%..100% percentile pixel
/// values and slider positions run 1..=10 left to right:
///
/// - position 1 ("best values") thresholds at the 90th percentile, `breaks[8]`
/// - position 9 thresholds at the 10th percentile, `breaks[0]`
/// - position 10 ("all values") applies no threshold
///
/// The `breaks[n - p - 1]` indexing is the served behavior and is kept
/// exactly, inversion and all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdSlider {
    max: u32,
    value: u32,
}

impl ThresholdSlider {
    pub fn new() -> Self {
        Self { max: 10, value: 10 }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn set_value(&mut self, position: u32) {
        self.value = position.clamp(1, self.max);
    }

    /// Resize the slider to match a fresh breaks count. The slider always
    /// keeps at least 2 positions. Returns true when the range changed, in
    /// which case the value resets to the maximum ("show all values").
    pub fn sync_breaks(&mut self, breaks_len: usize) -> bool {
        let new_max = (breaks_len as u32).max(2);
        if new_max == self.max {
            return false;
        }
        self.max = new_max;
        self.value = new_max;
        true
    }

    /// Concrete numeric threshold for the current position, or `None` for
    /// "include everything".
    pub fn threshold(&self, breaks: &[f64]) -> Option<f64> {
        let i = breaks.len() as i64 - self.value as i64 - 1;
        if i < 0 {
            None
        } else {
            Some(breaks[i as usize])
        }
    }
}

impl Default for ThresholdSlider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ThresholdSlider;

    fn ten_breaks() -> Vec<f64> {
        vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
    }

    #[test]
    fn rightmost_position_means_no_threshold() {
        let mut slider = ThresholdSlider::new();
        slider.sync_breaks(10);
        slider.set_value(10);
        assert_eq!(slider.threshold(&ten_breaks()), None);
    }

    #[test]
    fn position_one_is_the_highest_percentile() {
        let mut slider = ThresholdSlider::new();
        slider.sync_breaks(10);
        slider.set_value(1);
        // breaks[10 - 1 - 1] = breaks[8] = 90
        assert_eq!(slider.threshold(&ten_breaks()), Some(90.0));
    }

    #[test]
    fn position_nine_is_the_lowest_percentile() {
        let mut slider = ThresholdSlider::new();
        slider.sync_breaks(10);
        slider.set_value(9);
        // breaks[10 - 9 - 1] = breaks[0] = 10
        assert_eq!(slider.threshold(&ten_breaks()), Some(10.0));
    }

    #[test]
    fn range_change_resets_value_to_show_all() {
        let mut slider = ThresholdSlider::new();
        slider.sync_breaks(10);
        slider.set_value(3);

        // Same count: value preserved.
        assert!(!slider.sync_breaks(10));
        assert_eq!(slider.value(), 3);

        // Different count: range redrawn, value snaps to the maximum.
        assert!(slider.sync_breaks(5));
        assert_eq!(slider.max(), 5);
        assert_eq!(slider.value(), 5);
    }

    #[test]
    fn slider_never_shrinks_below_two_positions() {
        let mut slider = ThresholdSlider::new();
        assert!(slider.sync_breaks(1));
        assert_eq!(slider.max(), 2);
        assert_eq!(slider.value(), 2);
        // One break, position 2: i = 1 - 2 - 1 < 0, no threshold.
        assert_eq!(slider.threshold(&[42.0]), None);
        slider.set_value(1);
        // i = 1 - 1 - 1 = -1, still no threshold.
        assert_eq!(slider.threshold(&[42.0]), None);
    }

    #[test]
    fn set_value_clamps_to_range() {
        let mut slider = ThresholdSlider::new();
        slider.sync_breaks(10);
        slider.set_value(0);
        assert_eq!(slider.value(), 1);
        slider.set_value(99);
        assert_eq!(slider.value(), 10);
    }
}
