use tokio::sync::mpsc;

use crate::event::ParameterEvent;

/// Merge point for every parameter-change source.
///
/// Cloning the bus gives each UI source its own producer; all events land on
/// the single receiver in wall-clock arrival order.
#[derive(Debug, Clone)]
pub struct ParameterBus {
    tx: mpsc::UnboundedSender<ParameterEvent>,
}

impl ParameterBus {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ParameterEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Push an event. A dropped consumer means the session is gone; the
    /// event is discarded rather than surfaced as a failure.
    pub fn push(&self, event: ParameterEvent) {
        let _ = self.tx.send(event);
    }
}
