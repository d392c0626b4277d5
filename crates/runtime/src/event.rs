use foundation::LatLngBounds;
use model::{BoundaryId, CategoryId, ClassName, Polarity, VariableId};

/// One logical user action that can affect modeling state.
///
/// Every scattered UI control funnels into this single type so the merged
/// stream has one shape regardless of where a change originated.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterEvent {
    VariableToggled {
        source: VariableId,
        active: bool,
    },
    WeightChanged {
        source: VariableId,
        magnitude: i32,
    },
    PolarityChanged {
        source: VariableId,
        polarity: Polarity,
    },
    CategoryWeightChanged {
        category: CategoryId,
        weight: i32,
    },
    ThresholdMoved {
        position: u32,
    },
    TransparencyChanged {
        percent: u32,
    },
    /// The set of checked class names for one mask source.
    RasterMaskChanged {
        source: VariableId,
        checked: Vec<ClassName>,
    },
    BoundaryAdd {
        code: String,
    },
    BoundaryRemove {
        id: BoundaryId,
    },
    BoundsChanged(LatLngBounds),
    /// Synthetic event injected when a preset is applied.
    PresetApplied {
        id: String,
    },
}
