//! Single-flight permission request coordination.
//!
//! Owns the request lifecycle: resolve what can be answered synchronously,
//! issue at most one platform prompt for the rest, and correlate the
//! asynchronous grant callback back into per-group results. At most one
//! request is in flight; concurrent callers are rejected, not queued.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use permkit_core::config::BrokerConfig;
use permkit_core::registry::group_of;
use permkit_core::{PermissionGroup, PermissionStatus, PermissionStatusResolver};

use crate::host::PromptHost;
use crate::pending::PendingRequest;
use crate::types::{BrokerError, StatusMap};

/// Coordinates asynchronous multi-group permission requests.
pub struct RequestCoordinator {
    resolver: PermissionStatusResolver,
    host: RwLock<Option<Arc<dyn PromptHost>>>,
    pending: Mutex<Option<PendingRequest>>,
    request_code: u32,
}

impl RequestCoordinator {
    /// Create a coordinator over the given resolver.
    pub fn new(resolver: PermissionStatusResolver, config: &BrokerConfig) -> Self {
        Self {
            resolver,
            host: RwLock::new(None),
            pending: Mutex::new(None),
            request_code: config.request_code,
        }
    }

    /// Attach the platform surface able to show permission prompts.
    pub async fn attach_host(&self, host: Arc<dyn PromptHost>) {
        *self.host.write().await = Some(host);
    }

    /// Detach the platform surface (host lifecycle teardown).
    pub async fn detach_host(&self) {
        *self.host.write().await = None;
    }

    /// Request the given groups and await the per-group outcome.
    ///
    /// Groups that resolve synchronously (already granted, no platform
    /// concept, or nothing declared) never reach the platform; the rest
    /// are batched into exactly one prompt. Rejects immediately with
    /// [`BrokerError::AlreadyRequesting`] while a prior request is
    /// outstanding.
    pub async fn request_permissions(
        &self,
        groups: Vec<PermissionGroup>,
    ) -> Result<StatusMap, BrokerError> {
        let host = self.host.read().await.clone();

        let rx;
        {
            let mut slot = self.pending.lock().await;
            if slot.is_some() {
                return Err(BrokerError::AlreadyRequesting);
            }

            let (mut pending, receiver) = PendingRequest::new(groups.clone());
            rx = receiver;

            let Some(host) = host else {
                debug!("No prompt host attached; resolving every requested group as unknown");
                for group in &groups {
                    pending.record(*group, PermissionStatus::Unknown);
                }
                pending.complete();
                drop(slot);
                return rx.await.map_err(|_| BrokerError::CompletionDropped);
            };

            let mut batch: Vec<String> = Vec::new();
            for group in groups {
                let status = self.resolver.status_of(group);
                if status == PermissionStatus::Granted {
                    pending.record(group, PermissionStatus::Granted);
                    continue;
                }

                let declared = self
                    .resolver
                    .registry()
                    .concrete_ids_for(group)
                    .unwrap_or_default();
                if declared.is_empty() {
                    // Nothing promptable for this group; it resolves
                    // unknown without ever reaching the platform.
                    pending.record(group, PermissionStatus::Unknown);
                    continue;
                }

                for id in declared {
                    if !batch.contains(&id) {
                        batch.push(id);
                    }
                }
            }

            if batch.is_empty() {
                pending.complete();
            } else {
                info!(
                    identifiers = batch.len(),
                    request_code = self.request_code,
                    "Issuing platform permission request"
                );
                *slot = Some(pending);
                drop(slot);
                host.request_grants(&batch, self.request_code);
            }
        }

        rx.await.map_err(|_| BrokerError::CompletionDropped)
    }

    /// Platform grant callback.
    ///
    /// Returns `false` for an unrecognized request code (not handled).
    /// For a matching code, each identifier is reverse-mapped to its
    /// group (unmapped identifiers are skipped) and recorded first-write-
    /// wins, then the outstanding request completes and the coordinator
    /// returns to idle.
    pub async fn on_grant_result(&self, request_code: u32, ids: &[String], grants: &[bool]) -> bool {
        if request_code != self.request_code {
            return false;
        }

        let Some(mut pending) = self.pending.lock().await.take() else {
            debug!(request_code, "Grant callback arrived with no outstanding request");
            return true;
        };

        for (id, granted) in ids.iter().zip(grants.iter()) {
            let group = group_of(id);
            if group == PermissionGroup::Unknown {
                continue;
            }

            let status = if *granted {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            };
            pending.record(group, status);
        }

        pending.complete();
        true
    }

    /// Whether the platform recommends showing a request rationale for
    /// the group before prompting again.
    pub async fn should_show_rationale(&self, group: PermissionGroup) -> bool {
        let Some(host) = self.host.read().await.clone() else {
            debug!(%group, "No prompt host attached");
            return false;
        };

        let Some(declared) = self.resolver.registry().concrete_ids_for(group) else {
            debug!(%group, "No platform-specific permissions needed for group");
            return false;
        };

        // The platform's answer for the first declared identifier decides.
        declared.first().is_some_and(|id| host.should_show_rationale(id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use super::*;
    use permkit_core::registry::ids;
    use permkit_core::{
        GrantQuery, GrantState, ManifestDeclarationCache, ManifestSource, PermissionGroupRegistry,
    };

    struct FixedManifest(Vec<String>);

    impl ManifestSource for FixedManifest {
        fn declared_permissions(&self) -> permkit_core::Result<Vec<String>> {
            Ok(self.0.clone())
        }

        fn target_sdk_version(&self) -> permkit_core::Result<u32> {
            Ok(33)
        }
    }

    struct MapGrants(HashMap<String, GrantState>);

    impl GrantQuery for MapGrants {
        fn current_grant(&self, id: &str) -> GrantState {
            self.0.get(id).copied().unwrap_or(GrantState::Denied)
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        prompts: StdMutex<Vec<(Vec<String>, u32)>>,
        rationale: bool,
    }

    impl PromptHost for RecordingHost {
        fn request_grants(&self, ids: &[String], request_code: u32) {
            self.prompts
                .lock()
                .unwrap()
                .push((ids.to_vec(), request_code));
        }

        fn should_show_rationale(&self, _id: &str) -> bool {
            self.rationale
        }
    }

    fn coordinator(
        declared: &[&str],
        grants: &[(&str, GrantState)],
    ) -> Arc<RequestCoordinator> {
        let manifest = Arc::new(ManifestDeclarationCache::new(Arc::new(FixedManifest(
            declared.iter().map(|s| (*s).to_string()).collect(),
        ))));
        let grants = MapGrants(
            grants
                .iter()
                .map(|(id, state)| ((*id).to_string(), *state))
                .collect(),
        );
        let resolver = PermissionStatusResolver::new(
            PermissionGroupRegistry::new(manifest),
            Arc::new(grants),
        );
        Arc::new(RequestCoordinator::new(
            resolver,
            &BrokerConfig::default(),
        ))
    }

    async fn wait_for_prompt(host: &RecordingHost) -> (Vec<String>, u32) {
        for _ in 0..100 {
            if let Some(prompt) = host.prompts.lock().unwrap().first().cloned() {
                return prompt;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("platform prompt was never issued");
    }

    #[tokio::test]
    async fn no_host_resolves_everything_unknown() {
        let coordinator = coordinator(&[ids::CAMERA], &[]);

        let results = coordinator
            .request_permissions(vec![PermissionGroup::Camera, PermissionGroup::Phone])
            .await
            .unwrap();

        assert_eq!(
            results.get(&PermissionGroup::Camera),
            Some(&PermissionStatus::Unknown)
        );
        assert_eq!(
            results.get(&PermissionGroup::Phone),
            Some(&PermissionStatus::Unknown)
        );
    }

    #[tokio::test]
    async fn already_granted_group_never_prompts() {
        let coordinator = coordinator(&[ids::CAMERA], &[(ids::CAMERA, GrantState::Granted)]);
        let host = Arc::new(RecordingHost::default());
        coordinator.attach_host(Arc::clone(&host) as Arc<dyn PromptHost>).await;

        let results = coordinator
            .request_permissions(vec![PermissionGroup::Camera])
            .await
            .unwrap();

        assert_eq!(
            results.get(&PermissionGroup::Camera),
            Some(&PermissionStatus::Granted)
        );
        assert!(host.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_platform_concept_completes_synchronously() {
        let coordinator = coordinator(&[], &[]);
        let host = Arc::new(RecordingHost::default());
        coordinator.attach_host(Arc::clone(&host) as Arc<dyn PromptHost>).await;

        let results = coordinator
            .request_permissions(vec![PermissionGroup::Photos])
            .await
            .unwrap();

        assert_eq!(
            results.get(&PermissionGroup::Photos),
            Some(&PermissionStatus::Granted)
        );
        assert!(host.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn undeclared_group_resolves_unknown_without_prompt() {
        let coordinator = coordinator(&[], &[]);
        let host = Arc::new(RecordingHost::default());
        coordinator.attach_host(Arc::clone(&host) as Arc<dyn PromptHost>).await;

        let results = coordinator
            .request_permissions(vec![PermissionGroup::Camera])
            .await
            .unwrap();

        assert_eq!(
            results.get(&PermissionGroup::Camera),
            Some(&PermissionStatus::Unknown)
        );
        assert!(host.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_group_list_completes_with_empty_map() {
        let coordinator = coordinator(&[ids::CAMERA], &[]);
        let host = Arc::new(RecordingHost::default());
        coordinator.attach_host(Arc::clone(&host) as Arc<dyn PromptHost>).await;

        let results = coordinator.request_permissions(vec![]).await.unwrap();

        assert!(results.is_empty());
        assert!(host.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn prompt_carries_deduplicated_declared_identifiers() {
        let coordinator = coordinator(
            &[ids::CAMERA, ids::READ_PHONE_STATE, ids::CALL_PHONE],
            &[],
        );
        let host = Arc::new(RecordingHost::default());
        coordinator.attach_host(Arc::clone(&host) as Arc<dyn PromptHost>).await;

        let task = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move {
                coordinator
                    .request_permissions(vec![PermissionGroup::Phone, PermissionGroup::Phone])
                    .await
            }
        });

        let (prompted, code) = wait_for_prompt(&host).await;
        assert_eq!(prompted, vec![ids::READ_PHONE_STATE, ids::CALL_PHONE]);
        assert_eq!(code, 24);

        let handled = coordinator
            .on_grant_result(code, &prompted, &[true, true])
            .await;
        assert!(handled);

        let results = task.await.unwrap().unwrap();
        assert_eq!(
            results.get(&PermissionGroup::Phone),
            Some(&PermissionStatus::Granted)
        );
    }

    #[tokio::test]
    async fn unrecognized_request_code_is_not_handled() {
        let coordinator = coordinator(&[ids::CAMERA], &[]);
        let host = Arc::new(RecordingHost::default());
        coordinator.attach_host(Arc::clone(&host) as Arc<dyn PromptHost>).await;

        let task = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move {
                coordinator
                    .request_permissions(vec![PermissionGroup::Camera])
                    .await
            }
        });

        let (prompted, _) = wait_for_prompt(&host).await;

        // Wrong tag: ignored, the request stays outstanding.
        let handled = coordinator.on_grant_result(9999, &prompted, &[true]).await;
        assert!(!handled);
        assert!(!task.is_finished());

        // The real callback still completes it.
        assert!(coordinator.on_grant_result(24, &prompted, &[false]).await);
        let results = task.await.unwrap().unwrap();
        assert_eq!(
            results.get(&PermissionGroup::Camera),
            Some(&PermissionStatus::Denied)
        );
    }

    #[tokio::test]
    async fn callback_without_outstanding_request_is_claimed() {
        let coordinator = coordinator(&[ids::CAMERA], &[]);
        let handled = coordinator
            .on_grant_result(24, &[ids::CAMERA.to_string()], &[true])
            .await;
        assert!(handled);
    }

    #[tokio::test]
    async fn callback_skips_unmapped_identifiers() {
        let coordinator = coordinator(&[ids::CAMERA], &[]);
        let host = Arc::new(RecordingHost::default());
        coordinator.attach_host(Arc::clone(&host) as Arc<dyn PromptHost>).await;

        let task = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            async move {
                coordinator
                    .request_permissions(vec![PermissionGroup::Camera])
                    .await
            }
        });

        let (prompted, code) = wait_for_prompt(&host).await;
        let with_stranger = vec![
            "android.permission.BODY_SENSORS".to_string(),
            prompted[0].clone(),
        ];
        coordinator
            .on_grant_result(code, &with_stranger, &[false, true])
            .await;

        let results = task.await.unwrap().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(
            results.get(&PermissionGroup::Camera),
            Some(&PermissionStatus::Granted)
        );
    }

    #[tokio::test]
    async fn rationale_false_without_host_or_identifiers() {
        let coordinator = coordinator(&[ids::CAMERA], &[]);
        assert!(!coordinator.should_show_rationale(PermissionGroup::Camera).await);

        let host = Arc::new(RecordingHost {
            rationale: true,
            ..RecordingHost::default()
        });
        coordinator.attach_host(Arc::clone(&host) as Arc<dyn PromptHost>).await;

        assert!(coordinator.should_show_rationale(PermissionGroup::Camera).await);
        // No platform concept -> never a rationale.
        assert!(!coordinator.should_show_rationale(PermissionGroup::Photos).await);
        // Declared nothing for phone -> no rationale either.
        assert!(!coordinator.should_show_rationale(PermissionGroup::Phone).await);
    }
}
