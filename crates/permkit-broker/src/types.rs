//! Broker types.

use std::collections::HashMap;

use permkit_core::{PermissionGroup, PermissionStatus};

/// Final group-to-status mapping delivered to the caller.
pub type StatusMap = HashMap<PermissionGroup, PermissionStatus>;

/// Caller-visible broker errors.
///
/// Platform-level failures never appear here; they degrade to `Unknown`
/// statuses inside the result map.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    /// A second request arrived while one is still outstanding. The first
    /// request is unaffected; the caller should wait for it to finish.
    #[error(
        "ERROR_ALREADY_REQUESTING: a permission request is already running, \
         wait for it to finish before starting another (multiple groups can \
         be requested in one call)"
    )]
    AlreadyRequesting,

    /// The completion channel was dropped before delivering a result.
    /// Defensive; unreachable as long as the coordinator owns the pending
    /// record.
    #[error("Permission request completion channel dropped")]
    CompletionDropped,
}
