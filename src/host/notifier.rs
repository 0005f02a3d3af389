// Host Notifier
// Fire-and-forget delivery of host messages over an async channel

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use super::HostMessage;

/// Posts messages to the host without waiting for acknowledgment
#[derive(Debug, Clone)]
pub struct HostNotifier {
    tx: UnboundedSender<HostMessage>,
}

impl HostNotifier {
    /// Create a notifier and the receiving end of its channel
    pub fn channel() -> (Self, UnboundedReceiver<HostMessage>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    /// Post a message; never blocks, and a closed channel only logs
    pub fn post(&self, message: HostMessage) {
        debug!(kind = message.kind(), "posting message to host");
        if let Err(err) = self.tx.send(message) {
            warn!(kind = err.0.kind(), "host channel closed, dropping message");
        }
    }
}

/// Drain outbound messages into the log until every notifier is dropped
///
/// Stands in for the host transport when running outside the design tool.
pub async fn log_outbound(mut rx: UnboundedReceiver<HostMessage>) -> usize {
    let mut delivered = 0;

    while let Some(message) = rx.recv().await {
        match serde_json::to_string(&message) {
            Ok(payload) => info!(kind = message.kind(), %payload, "message to host"),
            Err(err) => warn!(kind = message.kind(), error = %err, "failed to encode host message"),
        }
        delivered += 1;
    }

    delivered
}
