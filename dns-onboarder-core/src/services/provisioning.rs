//! Zone 开通服务

use std::sync::Arc;

use async_trait::async_trait;
use dns_onboarder_provider::{
    CreateDnsRecordRequest, CreateZoneRequest, DnsProvider, ProviderError, ProviderZone,
};

use crate::traits::{RecordTemplateSource, ZoneProvisioner};
use crate::types::RecordTemplate;

/// 在托管商处创建 Zone，并按记录模板表写入记录
///
/// Zone 创建失败或模板表无法使用时整体失败；单行失败只记录并跳过。
pub struct ProvisioningService {
    provider: Arc<dyn DnsProvider>,
    records: Arc<dyn RecordTemplateSource>,
    account_id: Option<String>,
}

impl ProvisioningService {
    #[must_use]
    pub fn new(provider: Arc<dyn DnsProvider>, records: Arc<dyn RecordTemplateSource>) -> Self {
        Self {
            provider,
            records,
            account_id: None,
        }
    }

    /// 指定 Zone 归属的账户（空字符串视为未指定）
    #[must_use]
    pub fn with_account(mut self, account_id: Option<String>) -> Self {
        self.account_id = account_id.filter(|id| !id.is_empty());
        self
    }

    /// 创建 Zone；已存在时取回现有 Zone
    async fn ensure_zone(&self, name: &str) -> Option<ProviderZone> {
        let request = CreateZoneRequest::new(name).with_account(self.account_id.clone());

        match self.provider.create_zone(&request).await {
            Ok(zone) => Some(zone),
            Err(ProviderError::ZoneExists { .. }) => {
                log::info!("Zone {name} already exists, reusing it");
                match self.provider.find_zone(name).await {
                    Ok(Some(zone)) => Some(zone),
                    Ok(None) => {
                        log::error!("Zone {name} reported as existing but was not found");
                        None
                    }
                    Err(e) => {
                        log_provider_error(&format!("Looking up zone {name}"), &e);
                        None
                    }
                }
            }
            Err(e) => {
                log_provider_error(&format!("Creating zone {name}"), &e);
                None
            }
        }
    }

    async fn create_record(
        &self,
        zone: &ProviderZone,
        template: &RecordTemplate,
    ) -> Result<(), ProviderError> {
        let request = CreateDnsRecordRequest {
            zone_id: zone.id.clone(),
            record_type: template.record_type,
            name: template.name.clone(),
            content: template.content.clone(),
            ttl: template.ttl,
            proxied: Some(template.proxied),
        };
        self.provider.create_record(&request).await.map(|_| ())
    }
}

#[async_trait]
impl ZoneProvisioner for ProvisioningService {
    async fn provision(&self, name: &str) -> bool {
        let Some(zone) = self.ensure_zone(name).await else {
            return false;
        };

        let table = match self.records.load().await {
            Ok(table) => table,
            Err(e) => {
                log::error!("Record table unusable, not provisioning {name}: {e}");
                return false;
            }
        };

        let mut created = 0usize;
        let mut skipped = 0usize;
        for row in table.rows() {
            match row {
                Ok(template) => match self.create_record(&zone, template).await {
                    Ok(()) => created += 1,
                    Err(e) => {
                        skipped += 1;
                        log_provider_error(
                            &format!(
                                "Creating {} {} in {name}",
                                template.record_type, template.name
                            ),
                            &e,
                        );
                    }
                },
                Err(e) => {
                    skipped += 1;
                    log::warn!("Skipping record table {e}");
                }
            }
        }

        log::info!(
            "Provisioned {name} (zone {}): {created} records created, {skipped} skipped",
            zone.id
        );
        true
    }
}

/// 按错误性质选择日志级别
fn log_provider_error(action: &str, e: &ProviderError) {
    if e.is_expected() {
        log::warn!("{action} failed: {e}");
    } else {
        log::error!("{action} failed: {e}");
    }
}
