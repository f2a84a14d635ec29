//! Manifest declaration cache.
//!
//! The set of permissions a host app declares cannot change at runtime,
//! so the platform is queried once per process and the result memoized
//! for the process lifetime. A failing query degrades to the empty set
//! and is never raised to the caller.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use tracing::warn;

use crate::Result;

/// Target SDK assumed when the platform cannot report one. Anything at or
/// above the runtime-permission introduction keeps live grant checks on.
const FALLBACK_TARGET_SDK: u32 = 31;

/// Platform seam supplying the host app's manifest data.
pub trait ManifestSource: Send + Sync {
    /// Full set of permission identifiers the host app declares.
    fn declared_permissions(&self) -> Result<Vec<String>>;

    /// The API level the host app targets.
    fn target_sdk_version(&self) -> Result<u32>;
}

/// Lazily populated, process-lifetime cache over a [`ManifestSource`].
///
/// Once populated the cache is never invalidated; the first-populate path
/// is internally synchronized, so shared instances are safe across tasks.
pub struct ManifestDeclarationCache {
    source: Arc<dyn ManifestSource>,
    declared: OnceLock<HashSet<String>>,
    target_sdk: OnceLock<u32>,
}

impl ManifestDeclarationCache {
    /// Create an unpopulated cache over the given source.
    pub fn new(source: Arc<dyn ManifestSource>) -> Self {
        Self {
            source,
            declared: OnceLock::new(),
            target_sdk: OnceLock::new(),
        }
    }

    /// Whether the host app declares the given identifier. Exact string
    /// membership; the first call populates the cache.
    pub fn is_declared(&self, id: &str) -> bool {
        self.declared_set().contains(id)
    }

    /// The host app's target API level, cached on first use.
    ///
    /// A failing source assumes the runtime-permission era so resolution
    /// keeps consulting live grants instead of reporting implicit grants.
    pub fn target_sdk_version(&self) -> u32 {
        *self.target_sdk.get_or_init(|| {
            self.source.target_sdk_version().unwrap_or_else(|error| {
                warn!(%error, "Unable to read target SDK version from manifest");
                FALLBACK_TARGET_SDK
            })
        })
    }

    fn declared_set(&self) -> &HashSet<String> {
        self.declared.get_or_init(|| {
            match self.source.declared_permissions() {
                Ok(declared) => declared.into_iter().collect(),
                Err(error) => {
                    warn!(%error, "Unable to check manifest for declared permissions");
                    HashSet::new()
                }
            }
        })
    }
}
