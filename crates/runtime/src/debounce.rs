use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

/// Trailing-edge debounce: a burst of inputs collapses to its final value,
/// delivered once the stream has been quiet for `window`.
///
/// Intermediate values are dropped on purpose; there is no guarantee every
/// transient state is ever delivered downstream.
pub fn debounce<T: Send + 'static>(
    mut input: mpsc::UnboundedReceiver<T>,
    window: Duration,
) -> mpsc::UnboundedReceiver<T> {
    let (tx, output) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        loop {
            let Some(first) = input.recv().await else {
                return;
            };
            let mut latest = first;
            let deadline = tokio::time::sleep(window);
            tokio::pin!(deadline);
            loop {
                tokio::select! {
                    () = &mut deadline => {
                        if tx.send(latest).is_err() {
                            return;
                        }
                        break;
                    }
                    next = input.recv() => match next {
                        Some(value) => {
                            latest = value;
                            deadline.as_mut().reset(Instant::now() + window);
                        }
                        None => {
                            // Flush the pending value before shutting down.
                            let _ = tx.send(latest);
                            return;
                        }
                    }
                }
            }
        }
    });
    output
}
