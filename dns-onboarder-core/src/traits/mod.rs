//! Abstraction traits injected by the platform layer

mod domain_store;
mod onboarding;

pub use domain_store::{ActiveDomainStore, NameListStore};
pub use onboarding::{DelegationVerifier, RecordTemplateSource, ZoneProvisioner};
