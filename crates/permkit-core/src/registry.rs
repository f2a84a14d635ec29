//! Static permission group registry.
//!
//! Maps each logical group to its ordered set of concrete Android
//! identifiers, filtered to the ones the host app actually declares.
//! The table is immutable configuration data, not control flow.

use std::sync::Arc;

use tracing::debug;

use crate::groups::PermissionGroup;
use crate::manifest::ManifestDeclarationCache;

/// Concrete Android permission identifiers referenced by the table.
pub mod ids {
    pub const CAMERA: &str = "android.permission.CAMERA";
    pub const READ_PHONE_STATE: &str = "android.permission.READ_PHONE_STATE";
    pub const CALL_PHONE: &str = "android.permission.CALL_PHONE";
    pub const READ_CALL_LOG: &str = "android.permission.READ_CALL_LOG";
    pub const WRITE_CALL_LOG: &str = "android.permission.WRITE_CALL_LOG";
    pub const ADD_VOICEMAIL: &str = "com.android.voicemail.permission.ADD_VOICEMAIL";
    pub const USE_SIP: &str = "android.permission.USE_SIP";
    pub const PROCESS_OUTGOING_CALLS: &str = "android.permission.PROCESS_OUTGOING_CALLS";
}

const CAMERA_IDS: &[&str] = &[ids::CAMERA];

const PHONE_IDS: &[&str] = &[
    ids::READ_PHONE_STATE,
    ids::CALL_PHONE,
    ids::READ_CALL_LOG,
    ids::WRITE_CALL_LOG,
    ids::ADD_VOICEMAIL,
    ids::USE_SIP,
    ids::PROCESS_OUTGOING_CALLS,
];

/// Ordered concrete identifiers for a group, before manifest filtering.
///
/// `None` means no platform permission concept applies to the group on
/// Android (treat as always satisfied).
pub const fn platform_ids(group: PermissionGroup) -> Option<&'static [&'static str]> {
    match group {
        PermissionGroup::Camera => Some(CAMERA_IDS),
        PermissionGroup::Phone => Some(PHONE_IDS),
        PermissionGroup::Photos | PermissionGroup::Unknown => None,
    }
}

/// Reverse lookup: the logical group a concrete identifier belongs to.
///
/// Identifiers outside the table map to [`PermissionGroup::Unknown`].
pub fn group_of(id: &str) -> PermissionGroup {
    if CAMERA_IDS.contains(&id) {
        return PermissionGroup::Camera;
    }
    if PHONE_IDS.contains(&id) {
        return PermissionGroup::Phone;
    }
    PermissionGroup::Unknown
}

/// Registry resolving logical groups to declared concrete identifiers.
#[derive(Clone)]
pub struct PermissionGroupRegistry {
    manifest: Arc<ManifestDeclarationCache>,
}

impl PermissionGroupRegistry {
    /// Create a registry backed by the given manifest cache.
    pub const fn new(manifest: Arc<ManifestDeclarationCache>) -> Self {
        Self { manifest }
    }

    /// Concrete identifiers the host app declares for a group.
    ///
    /// - `None`: no platform permission concept applies to the group.
    /// - `Some(empty)`: the group is known but the host declared none of
    ///   its identifiers — a manifest-configuration defect, distinct from
    ///   `None`.
    /// - Otherwise: the declared subset, in table order.
    pub fn concrete_ids_for(&self, group: PermissionGroup) -> Option<Vec<String>> {
        let table = platform_ids(group)?;
        let declared: Vec<String> = table
            .iter()
            .filter(|id| self.manifest.is_declared(id))
            .map(|id| (*id).to_string())
            .collect();

        if declared.is_empty() {
            debug!(%group, "No declared identifiers found in manifest for group");
        }
        Some(declared)
    }

    /// The manifest cache backing this registry.
    pub fn manifest(&self) -> &ManifestDeclarationCache {
        &self.manifest
    }
}
