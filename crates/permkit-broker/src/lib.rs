//! PermKit Request Broker
//!
//! Asynchronous coordination layer on top of `permkit-core`:
//! - Single-flight permission request lifecycle with one-shot completion
//! - Correlation of the platform grant callback back to per-group results
//! - Prompt-host seam for the platform surface that shows the dialog
//! - Caller-facing handler bundling check, request and rationale commands

pub mod coordinator;
pub mod handler;
pub mod host;
pub mod pending;
pub mod types;

pub use coordinator::RequestCoordinator;
pub use handler::{PermissionHandler, PlatformSeams};
pub use host::PromptHost;
pub use pending::PendingRequest;
pub use types::{BrokerError, StatusMap};
