//! DNS Onboarder Core Library
//!
//! Provides the onboarding lifecycle for domains handed to the service:
//! - Domain registry (pending / active / removed collections)
//! - Delegation verification against the expected nameservers
//! - Zone provisioning from a record template table
//! - Periodic reconciliation loops
//! - Submission and status views
//!
//! Persistence, DNS resolution and the hosting provider are injected through
//! traits, so the platform layer decides where data lives.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{
    DomainRegistry, NameserverVerifier, ProvisioningService, ReconcileIntervals, Reconciler,
    RecordTable, RegistryStores, StatusService, SubmissionService,
};
pub use traits::{
    ActiveDomainStore, DelegationVerifier, NameListStore, RecordTemplateSource, ZoneProvisioner,
};
pub use types::{
    ActivePassReport, DomainRecord, PendingPassReport, RecordRowError, RecordTemplate,
    StatusSnapshot,
};
