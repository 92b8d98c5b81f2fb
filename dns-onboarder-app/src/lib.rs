//! Application bootstrap for the DNS onboarder.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection)
//! and the file-backed storage adapters.

pub mod adapters;

use std::path::PathBuf;
use std::sync::Arc;

use dns_onboarder_core::{
    CoreError, CoreResult, DelegationVerifier, DomainRegistry, NameserverVerifier,
    ProvisioningService, ReconcileIntervals, Reconciler, RecordTemplateSource, RegistryStores,
    StatusService, SubmissionService, ZoneProvisioner,
};
use dns_onboarder_provider::DnsProvider;
use dns_onboarder_toolbox::NameserverLookup;
use tokio::task::JoinHandle;

use crate::adapters::{JsonActiveDomainStore, LineNameListStore};

/// File locations of the three collections.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub active: PathBuf,
    pub pending: PathBuf,
    pub removed: PathBuf,
}

impl StoragePaths {
    /// Build registry stores backed by these files.
    #[must_use]
    pub fn into_stores(self) -> RegistryStores {
        RegistryStores {
            active: Arc::new(JsonActiveDomainStore::new(self.active)),
            pending: Arc::new(LineNameListStore::new(self.pending)),
            removed: Arc::new(LineNameListStore::new(self.removed)),
        }
    }
}

/// Handles of the two background reconciliation loops.
pub struct ReconcileTasks {
    pub active: JoinHandle<()>,
    pub pending: JoinHandle<()>,
}

impl ReconcileTasks {
    pub fn abort(&self) {
        self.active.abort();
        self.pending.abort();
    }
}

/// Application state.
///
/// Holds the registry and every service built on it. Constructed once at
/// startup via `AppStateBuilder`.
pub struct AppState {
    /// Domain registry (pending / active / removed)
    pub registry: Arc<DomainRegistry>,
    /// Periodic reconciliation
    pub reconciler: Arc<Reconciler>,
    /// Submission gateway
    pub submission_service: SubmissionService,
    /// Read-only views
    pub status_service: StatusService,
}

impl AppState {
    /// Start both reconciliation loops. Each runs its first pass immediately.
    pub fn spawn_reconcile_loops(&self) -> ReconcileTasks {
        ReconcileTasks {
            active: self.reconciler.spawn_active_loop(),
            pending: self.reconciler.spawn_pending_loop(),
        }
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required
/// - `stores` — where the three collections are persisted
/// - a delegation verifier, either `verifier` or `nameserver_lookup`
/// - a zone provisioner, either `provisioner` or `provider`
///
/// # Optional
/// - `intervals` — defaults to 3h (active) / 1h (pending)
pub struct AppStateBuilder {
    stores: Option<RegistryStores>,
    verifier: Option<Arc<dyn DelegationVerifier>>,
    provisioner: Option<Arc<dyn ZoneProvisioner>>,
    intervals: ReconcileIntervals,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stores: None,
            verifier: None,
            provisioner: None,
            intervals: ReconcileIntervals::default(),
        }
    }

    #[must_use]
    pub fn stores(mut self, stores: RegistryStores) -> Self {
        self.stores = Some(stores);
        self
    }

    #[must_use]
    pub fn verifier(mut self, verifier: Arc<dyn DelegationVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Verify delegation by comparing `lookup` answers with `expected`.
    #[must_use]
    pub fn nameserver_lookup(
        self,
        lookup: Arc<dyn NameserverLookup>,
        expected: Vec<String>,
    ) -> Self {
        self.verifier(Arc::new(NameserverVerifier::new(lookup, expected)))
    }

    #[must_use]
    pub fn provisioner(mut self, provisioner: Arc<dyn ZoneProvisioner>) -> Self {
        self.provisioner = Some(provisioner);
        self
    }

    /// Provision zones at `provider`, seeding records from `records`.
    #[must_use]
    pub fn provider(
        self,
        provider: Arc<dyn DnsProvider>,
        records: Arc<dyn RecordTemplateSource>,
        account_id: Option<String>,
    ) -> Self {
        let service = ProvisioningService::new(provider, records).with_account(account_id);
        self.provisioner(Arc::new(service))
    }

    #[must_use]
    pub fn intervals(mut self, intervals: ReconcileIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    /// Load the registry from its stores and build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub async fn build(self) -> CoreResult<AppState> {
        let stores = self
            .stores
            .ok_or_else(|| CoreError::ValidationError("stores are required".to_string()))?;
        let verifier = self.verifier.ok_or_else(|| {
            CoreError::ValidationError("delegation verifier is required".to_string())
        })?;
        let provisioner = self.provisioner.ok_or_else(|| {
            CoreError::ValidationError("zone provisioner is required".to_string())
        })?;

        let registry = Arc::new(DomainRegistry::load(stores).await);

        let reconciler = Arc::new(Reconciler::new(
            Arc::clone(&registry),
            verifier,
            provisioner,
            self.intervals,
        ));

        Ok(AppState {
            submission_service: SubmissionService::new(Arc::clone(&registry)),
            status_service: StatusService::new(Arc::clone(&registry)),
            reconciler,
            registry,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
