//! Pending permission request record.
//!
//! At most one of these exists per coordinator. It owns the caller's
//! completion channel and accumulates per-group results until completion,
//! which consumes the record and therefore can fire at most once.

use tokio::sync::oneshot;
use tracing::debug;

use permkit_core::{PermissionGroup, PermissionStatus};

use crate::types::StatusMap;

/// In-flight permission request.
pub struct PendingRequest {
    requested: Vec<PermissionGroup>,
    results: StatusMap,
    reply: oneshot::Sender<StatusMap>,
}

impl PendingRequest {
    /// Create a pending record for the given groups, paired with the
    /// receiver the caller awaits.
    pub fn new(requested: Vec<PermissionGroup>) -> (Self, oneshot::Receiver<StatusMap>) {
        let (reply, rx) = oneshot::channel();
        (
            Self {
                requested,
                results: StatusMap::new(),
                reply,
            },
            rx,
        )
    }

    /// Record a result for a group. First write wins; later writes for
    /// the same group are ignored.
    pub fn record(&mut self, group: PermissionGroup, status: PermissionStatus) {
        self.results.entry(group).or_insert(status);
    }

    /// Deliver the accumulated results to the caller and drop the record.
    pub fn complete(self) {
        debug!(
            requested = self.requested.len(),
            resolved = self.results.len(),
            "Completing permission request"
        );
        // The caller may have dropped the receiver; nothing left to do then.
        let _ = self.reply.send(self.results);
    }
}
