//! PermKit Core Library
//!
//! Synchronous resolution layer for the PermKit permission abstraction:
//! - Portable permission group and status enumerations
//! - Static group-to-identifier table filtered through the host manifest
//! - Live grant state aggregation into one status per group
//! - Telephony service availability checks
//! - Common error types and configuration

pub mod config;
pub mod error;
pub mod groups;
pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod service;
pub mod tracing_init;

pub use config::Config;
pub use error::{Error, Result};
pub use groups::{PermissionGroup, PermissionStatus, ServiceStatus};
pub use manifest::{ManifestDeclarationCache, ManifestSource};
pub use registry::PermissionGroupRegistry;
pub use resolver::{GrantQuery, GrantState, PermissionStatusResolver};
pub use service::{ServiceAvailabilityChecker, ServiceProbes};
