use crate::stash::HostClient;
use std::sync::Arc;

/// Tells the host to re-index after files were converted.
pub struct Notifier {
    host: Arc<dyn HostClient>,
}

impl Notifier {
    pub fn new(host: Arc<dyn HostClient>) -> Self {
        Self { host }
    }

    /// Request a metadata scan.
    /// This method is fire-and-forget - errors are logged but not propagated.
    /// Returns whether the host accepted the request.
    pub async fn request_reindex(&self) -> bool {
        match self.host.trigger_scan().await {
            Ok(()) => {
                tracing::info!("Triggered Stash metadata scan");
                true
            }
            Err(e) => {
                tracing::warn!("Could not trigger scan: {:#}", e);
                false
            }
        }
    }
}
