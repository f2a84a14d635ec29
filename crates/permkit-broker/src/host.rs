//! Prompt-host seam.
//!
//! The platform surface (activity/window) able to show the system
//! permission dialog. Attach/detach follows the host lifecycle; while no
//! host is attached, requests degrade per the coordinator's rules.

/// Platform surface that can prompt the user for permissions.
pub trait PromptHost: Send + Sync {
    /// Issue one asynchronous platform permission prompt for the given
    /// concrete identifiers, tagged with `request_code`.
    ///
    /// The outcome arrives later through
    /// [`crate::RequestCoordinator::on_grant_result`] with the same code,
    /// identifiers and order. Implementations must not call back into the
    /// coordinator from inside this method.
    fn request_grants(&self, ids: &[String], request_code: u32);

    /// Whether the platform recommends showing a rationale for the given
    /// concrete identifier before prompting again.
    fn should_show_rationale(&self, id: &str) -> bool;
}
