//! 状态视图

use std::sync::Arc;

use crate::services::DomainRegistry;
use crate::types::{DomainRecord, StatusSnapshot};

/// 状态页和 JSON 导出使用的只读视图
pub struct StatusService {
    registry: Arc<DomainRegistry>,
}

impl StatusService {
    #[must_use]
    pub fn new(registry: Arc<DomainRegistry>) -> Self {
        Self { registry }
    }

    pub async fn snapshot(&self) -> StatusSnapshot {
        self.registry.snapshot_status().await
    }

    pub async fn export_active(&self) -> Vec<DomainRecord> {
        self.registry.snapshot_active().await
    }
}
