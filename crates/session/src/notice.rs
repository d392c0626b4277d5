use model::BoundaryId;

/// One-shot messages for the host UI, as opposed to the stateful watch
/// channels. Each notice is shown once and forgotten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A zip code resolved and was added to the boundary mask.
    BoundaryAdded(BoundaryId),
    /// A zip code did not resolve; `message` is the service's own text when
    /// it sent any.
    BoundaryLookupFailed { code: String, message: String },
}
