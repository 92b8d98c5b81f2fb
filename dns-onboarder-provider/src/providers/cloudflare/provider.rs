//! Cloudflare DnsProvider trait 实现

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::providers::common::normalize_domain_name;
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{CreateDnsRecordRequest, CreateZoneRequest, DnsRecord, ProviderZone};

use super::types::{CloudflareAccountRef, CreateRecordBody, CreateZoneBody};
use super::{CloudflareDnsRecord, CloudflareProvider, CloudflareZone};

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        Self::PROVIDER
    }

    async fn validate_credentials(&self) -> Result<bool> {
        #[derive(Deserialize)]
        struct VerifyResponse {
            status: String,
        }

        match self
            .get::<VerifyResponse>("/user/tokens/verify", ErrorContext::default())
            .await
        {
            Ok(resp) => Ok(resp.status == "active"),
            Err(e) => {
                log::warn!("Cloudflare token verification failed: {e}");
                Ok(false)
            }
        }
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<ProviderZone> {
        let name = normalize_domain_name(&req.name);
        let body = CreateZoneBody {
            name: name.clone(),
            account: req
                .account_id
                .clone()
                .map(|id| CloudflareAccountRef { id }),
            jump_start: req.jump_start,
            zone_type: "full",
        };

        let zone: CloudflareZone = self
            .post("/zones", &body, ErrorContext::Zone(name))
            .await?;

        log::info!("Zone {} created (id={})", zone.name, zone.id);
        Ok(zone.into())
    }

    async fn find_zone(&self, name: &str) -> Result<Option<ProviderZone>> {
        let name = normalize_domain_name(name);
        let path = format!("/zones?name={}", urlencoding::encode(&name));

        let zones: Vec<CloudflareZone> = self.get(&path, ErrorContext::Zone(name)).await?;

        Ok(zones.into_iter().next().map(ProviderZone::from))
    }

    async fn create_record(&self, req: &CreateDnsRecordRequest) -> Result<DnsRecord> {
        let body = CreateRecordBody {
            record_type: req.record_type.as_str().to_string(),
            name: req.name.clone(),
            content: req.content.clone(),
            ttl: req.ttl,
            proxied: req.proxied,
        };

        let cf_record: CloudflareDnsRecord = self
            .post(
                &format!("/zones/{}/dns_records", req.zone_id),
                &body,
                ErrorContext::Record {
                    zone_id: req.zone_id.clone(),
                    name: req.name.clone(),
                },
            )
            .await?;

        log::info!(
            "DNS record created: {} {} {}",
            cf_record.record_type,
            cf_record.name,
            cf_record.content
        );
        cf_record.into_dns_record(&req.zone_id)
    }
}
