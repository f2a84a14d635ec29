//! Group status resolution.
//!
//! Queries the platform's live grant state for every declared identifier
//! of a group and aggregates to one portable status. Denial dominates
//! ambiguity, ambiguity dominates grant.

use std::sync::Arc;

use tracing::debug;

use crate::groups::{PermissionGroup, PermissionStatus};
use crate::registry::PermissionGroupRegistry;

/// API level that introduced runtime permission prompts (Android M). Apps
/// targeting anything lower receive all declared permissions at install.
pub const RUNTIME_PERMISSION_SDK: u32 = 23;

/// Live grant state of one concrete identifier.
///
/// `Other` covers every transitional platform state that is neither a
/// grant nor a denial, including failed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantState {
    Granted,
    Denied,
    Other,
}

/// Platform seam for the synchronous grant-state query.
pub trait GrantQuery: Send + Sync {
    /// Current grant state of a concrete identifier.
    fn current_grant(&self, id: &str) -> GrantState;
}

/// Resolves one portable status per logical group.
#[derive(Clone)]
pub struct PermissionStatusResolver {
    registry: PermissionGroupRegistry,
    grants: Arc<dyn GrantQuery>,
}

impl PermissionStatusResolver {
    /// Create a resolver over the given registry and grant query.
    pub fn new(registry: PermissionGroupRegistry, grants: Arc<dyn GrantQuery>) -> Self {
        Self { registry, grants }
    }

    /// Aggregated status of a logical group.
    ///
    /// Precedence: any denied identifier wins, then any identifier in a
    /// transitional state, then granted.
    pub fn status_of(&self, group: PermissionGroup) -> PermissionStatus {
        let Some(declared) = self.registry.concrete_ids_for(group) else {
            debug!(%group, "No platform-specific permissions needed for group");
            return PermissionStatus::Granted;
        };

        if declared.is_empty() {
            debug!(%group, "No permissions found in manifest for group");
            return PermissionStatus::Unknown;
        }

        // Apps targeting a pre-runtime-prompt API level hold every declared
        // permission from install time.
        if self.registry.manifest().target_sdk_version() < RUNTIME_PERMISSION_SDK {
            return PermissionStatus::Granted;
        }

        let mut ambiguous = false;
        for id in &declared {
            match self.grants.current_grant(id) {
                GrantState::Denied => {
                    debug!(%group, id, "Identifier denied");
                    return PermissionStatus::Denied;
                }
                GrantState::Other => ambiguous = true,
                GrantState::Granted => {}
            }
        }

        if ambiguous {
            PermissionStatus::Unknown
        } else {
            PermissionStatus::Granted
        }
    }

    /// The registry this resolver consults.
    pub const fn registry(&self) -> &PermissionGroupRegistry {
        &self.registry
    }
}
