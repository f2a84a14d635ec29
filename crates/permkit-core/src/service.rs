//! Service availability checks.
//!
//! Only the phone group has an associated hardware/service dependency on
//! this platform; every other group is unconditionally not applicable.
//! Probe failures surface as `Unknown`, never as an error.

use std::sync::Arc;

use tracing::warn;

use crate::Result;
use crate::groups::{PermissionGroup, ServiceStatus};

/// Platform seam for telephony probes. Each probe can fail individually.
pub trait ServiceProbes: Send + Sync {
    /// Whether the device reports the telephony hardware feature.
    fn has_telephony_feature(&self) -> Result<bool>;

    /// Whether a phone radio is present (not `PHONE_TYPE_NONE`).
    fn has_phone_radio(&self) -> Result<bool>;

    /// Whether any installed app can handle a phone-call intent.
    fn can_handle_call_intent(&self) -> Result<bool>;

    /// Whether the SIM subsystem reports a ready state.
    fn sim_ready(&self) -> Result<bool>;
}

/// Determines whether the service behind a group is usable, independent
/// of its permission grant.
#[derive(Clone)]
pub struct ServiceAvailabilityChecker {
    probes: Arc<dyn ServiceProbes>,
}

impl ServiceAvailabilityChecker {
    /// Create a checker over the given probes.
    pub const fn new(probes: Arc<dyn ServiceProbes>) -> Self {
        Self { probes }
    }

    /// Availability of the service associated with a group.
    pub fn service_status_of(&self, group: PermissionGroup) -> ServiceStatus {
        if group != PermissionGroup::Phone {
            return ServiceStatus::NotApplicable;
        }

        match self.phone_service_status() {
            Ok(status) => status,
            Err(error) => {
                warn!(%group, %error, "Telephony probe failed");
                ServiceStatus::Unknown
            }
        }
    }

    fn phone_service_status(&self) -> Result<ServiceStatus> {
        if !self.probes.has_telephony_feature()? {
            return Ok(ServiceStatus::NotApplicable);
        }
        if !self.probes.has_phone_radio()? {
            return Ok(ServiceStatus::NotApplicable);
        }
        // Telephony API present but no app can place a call.
        if !self.probes.can_handle_call_intent()? {
            return Ok(ServiceStatus::NotApplicable);
        }
        if !self.probes.sim_ready()? {
            return Ok(ServiceStatus::Disabled);
        }
        Ok(ServiceStatus::Enabled)
    }
}
