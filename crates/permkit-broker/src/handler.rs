//! Caller-facing permission surface.
//!
//! One method per command of the portable contract. The transport that
//! delivers commands and returns responses lives outside this crate.

use std::sync::Arc;

use permkit_core::config::Config;
use permkit_core::{
    GrantQuery, ManifestDeclarationCache, ManifestSource, PermissionGroup, PermissionGroupRegistry,
    PermissionStatus, PermissionStatusResolver, ServiceAvailabilityChecker, ServiceProbes,
    ServiceStatus,
};

use crate::coordinator::RequestCoordinator;
use crate::host::PromptHost;
use crate::types::{BrokerError, StatusMap};

/// The platform seams a handler is wired to.
pub struct PlatformSeams {
    pub manifest: Arc<dyn ManifestSource>,
    pub grants: Arc<dyn GrantQuery>,
    pub probes: Arc<dyn ServiceProbes>,
}

/// Bundles status resolution, service checks and request coordination
/// behind the four caller commands.
pub struct PermissionHandler {
    resolver: PermissionStatusResolver,
    services: ServiceAvailabilityChecker,
    coordinator: Arc<RequestCoordinator>,
}

impl PermissionHandler {
    /// Wire a handler directly from platform seams and configuration.
    pub fn from_platform(seams: PlatformSeams, config: &Config) -> Self {
        let manifest = Arc::new(ManifestDeclarationCache::new(seams.manifest));
        let registry = PermissionGroupRegistry::new(manifest);
        let resolver = PermissionStatusResolver::new(registry, seams.grants);
        let services = ServiceAvailabilityChecker::new(seams.probes);
        let coordinator = Arc::new(RequestCoordinator::new(resolver.clone(), &config.broker));

        Self {
            resolver,
            services,
            coordinator,
        }
    }

    /// Current aggregated status of a group.
    pub fn check_status(&self, group: PermissionGroup) -> PermissionStatus {
        self.resolver.status_of(group)
    }

    /// Availability of the service behind a group.
    pub fn check_service_status(&self, group: PermissionGroup) -> ServiceStatus {
        self.services.service_status_of(group)
    }

    /// Request the given groups; at most one request at a time.
    pub async fn request_permissions(
        &self,
        groups: Vec<PermissionGroup>,
    ) -> Result<StatusMap, BrokerError> {
        self.coordinator.request_permissions(groups).await
    }

    /// Whether a rationale should be shown before re-prompting the group.
    pub async fn should_show_rationale(&self, group: PermissionGroup) -> bool {
        self.coordinator.should_show_rationale(group).await
    }

    /// Attach the prompt-capable platform surface.
    pub async fn attach_host(&self, host: Arc<dyn PromptHost>) {
        self.coordinator.attach_host(host).await;
    }

    /// Detach the platform surface.
    pub async fn detach_host(&self) {
        self.coordinator.detach_host().await;
    }

    /// The coordinator, for delivering platform grant callbacks.
    pub fn coordinator(&self) -> Arc<RequestCoordinator> {
        Arc::clone(&self.coordinator)
    }
}
