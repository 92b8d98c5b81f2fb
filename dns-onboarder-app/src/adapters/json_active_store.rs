//! 活跃域名仓库
//!
//! 使用 JSON 文件存储活跃集合（对象数组，字段 `name` / `nameservers_correct` / `last_checked`）

use std::path::PathBuf;

use async_trait::async_trait;
use dns_onboarder_core::{ActiveDomainStore, CoreError, CoreResult, DomainRecord};

use super::file_io::{read_optional, write_atomic};

/// 基于 JSON 文件的活跃集合存储
pub struct JsonActiveDomainStore {
    path: PathBuf,
}

impl JsonActiveDomainStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ActiveDomainStore for JsonActiveDomainStore {
    async fn load(&self) -> CoreResult<Vec<DomainRecord>> {
        let Some(content) = read_optional(&self.path).await? else {
            return Ok(Vec::new());
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            CoreError::SerializationError(format!("{}: {e}", self.path.display()))
        })
    }

    async fn save(&self, domains: &[DomainRecord]) -> CoreResult<()> {
        let content = serde_json::to_string_pretty(domains)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        write_atomic(&self.path, &content).await
    }
}
