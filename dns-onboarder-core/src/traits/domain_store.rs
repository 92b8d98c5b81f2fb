//! Collection persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::DomainRecord;

/// Persistence for the active collection.
///
/// Platform implementation:
/// - `JsonActiveDomainStore` (dns-onboarder-app, JSON file)
#[async_trait]
pub trait ActiveDomainStore: Send + Sync {
    /// Load the whole collection. A store that was never written yields an empty list.
    async fn load(&self) -> CoreResult<Vec<DomainRecord>>;

    /// Overwrite the whole collection.
    async fn save(&self, domains: &[DomainRecord]) -> CoreResult<()>;
}

/// Persistence for an ordered list of domain names (pending queue, removal history).
///
/// Platform implementation:
/// - `LineNameListStore` (dns-onboarder-app, one name per line)
#[async_trait]
pub trait NameListStore: Send + Sync {
    /// Load the whole list. A store that was never written yields an empty list.
    async fn load(&self) -> CoreResult<Vec<String>>;

    /// Overwrite the whole list.
    async fn save(&self, names: &[String]) -> CoreResult<()>;
}
