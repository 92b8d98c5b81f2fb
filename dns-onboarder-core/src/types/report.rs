//! Pass reports and status views

use serde::Serialize;

use super::DomainRecord;

/// Outcome of one pass over the active collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivePassReport {
    /// Entries checked this pass
    pub checked: usize,
    /// Entries updated in place
    pub refreshed: usize,
    /// Entries moved to the removal history
    pub evicted: usize,
}

/// Outcome of one pass over the pending queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PendingPassReport {
    /// Entries checked this pass
    pub checked: usize,
    /// Entries provisioned and moved to the active collection
    pub graduated: usize,
}

/// Read-only view rendered by the status page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusSnapshot {
    pub active: Vec<DomainRecord>,
    pub pending: Vec<String>,
    /// Size of the removal history
    pub removed_count: usize,
}
