//! Portable permission enumerations.
//!
//! Callers see logical groups and normalized statuses; the concrete
//! platform identifiers behind a group never leave this layer.

use serde::{Deserialize, Serialize};

/// Logical permission group presented to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermissionGroup {
    /// Camera access.
    Camera,
    /// Phone state, calls and call log.
    Phone,
    /// Photo library access (no platform permission concept on Android).
    Photos,
    /// Catch-all for unmapped input; resolves to no concrete identifiers.
    #[default]
    Unknown,
}

impl PermissionGroup {
    /// Every defined group, for iteration in tests and diagnostics.
    pub const ALL: [Self; 4] = [Self::Camera, Self::Phone, Self::Photos, Self::Unknown];
}

impl std::fmt::Display for PermissionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Camera => "camera",
            Self::Phone => "phone",
            Self::Photos => "photos",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Normalized permission status for one group.
///
/// There is no severity order between variants; aggregation uses the
/// explicit precedence in [`crate::resolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// Every declared identifier of the group is granted.
    Granted,
    /// At least one identifier of the group is denied.
    Denied,
    /// The feature behind the group is switched off (portable vocabulary,
    /// never produced by Android resolution).
    Disabled,
    /// Access is restricted by device policy (portable vocabulary, never
    /// produced by Android resolution).
    Restricted,
    /// Status could not be determined.
    #[default]
    Unknown,
}

impl std::fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Disabled => "disabled",
            Self::Restricted => "restricted",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Availability of the hardware/service a group depends on, independent
/// of its permission grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// The service is present and usable.
    Enabled,
    /// The service exists but is not ready (e.g. SIM absent).
    Disabled,
    /// The group has no associated service on this device.
    #[default]
    NotApplicable,
    /// A platform probe failed while determining availability.
    Unknown,
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::NotApplicable => "notapplicable",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
