//! Event log task for the binary

use crate::floor::FloorEvent;
use tokio::sync::broadcast;

/// Hand every received event to `sink` until the channel closes
///
/// A lagging receiver logs the gap and keeps going. Returns the number of
/// events skipped.
pub async fn run_event_log<F>(mut events: broadcast::Receiver<FloorEvent>, mut sink: F) -> u64
where
    F: FnMut(&FloorEvent),
{
    let mut skipped_total = 0;
    loop {
        match events.recv().await {
            Ok(event) => sink(&event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!("Event log lagged, skipped {} events", skipped);
                skipped_total += skipped;
            }
            Err(broadcast::error::RecvError::Closed) => {
                tracing::debug!("Event channel closed");
                break;
            }
        }
    }
    skipped_total
}
