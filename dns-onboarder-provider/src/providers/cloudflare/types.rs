//! Cloudflare API 类型定义

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::providers::common::parse_record_type;
use crate::traits::ProviderErrorMapper;
use crate::types::{DnsRecord, ProviderType, ProviderZone, ZoneStatus};

use super::CloudflareProvider;

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<CloudflareError>>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i32,
    pub message: String,
}

/// Cloudflare Zone 结构
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub name_servers: Vec<String>,
}

/// 创建 Zone 请求体中的账户引用
#[derive(Debug, Serialize)]
pub struct CloudflareAccountRef {
    pub id: String,
}

/// 创建 Zone 请求体
#[derive(Debug, Serialize)]
pub struct CreateZoneBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<CloudflareAccountRef>,
    pub jump_start: bool,
    #[serde(rename = "type")]
    pub zone_type: &'static str,
}

/// 创建 DNS 记录请求体
#[derive(Debug, Serialize)]
pub struct CreateRecordBody {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

/// Cloudflare DNS Record 结构（响应）
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: Option<bool>,
}

/// Cloudflare 状态：active, pending, initializing, moved
impl From<CloudflareZone> for ProviderZone {
    fn from(zone: CloudflareZone) -> Self {
        let status = match zone.status.as_str() {
            "active" => ZoneStatus::Active,
            "pending" | "initializing" => ZoneStatus::Pending,
            "moved" => ZoneStatus::Paused,
            _ => ZoneStatus::Unknown,
        };

        Self {
            id: zone.id,
            name: zone.name,
            provider: ProviderType::Cloudflare,
            status,
            name_servers: zone.name_servers,
        }
    }
}

impl CloudflareDnsRecord {
    pub fn into_dns_record(self, zone_id: &str) -> Result<DnsRecord> {
        Ok(DnsRecord {
            record_type: parse_record_type(&self.record_type, CloudflareProvider::PROVIDER)?,
            id: self.id,
            zone_id: zone_id.to_string(),
            name: self.name,
            content: self.content,
            ttl: self.ttl,
            proxied: self.proxied,
        })
    }
}
