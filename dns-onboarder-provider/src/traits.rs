use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CreateDnsRecordRequest, CreateZoneRequest, DnsRecord, ProviderZone};

/// 响应信封里的第一条 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    pub code: Option<i64>,
    pub message: String,
}

impl RawApiError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// 出错的请求针对的对象，映射 `*Exists` / `ZoneNotFound` 时用来补全名称
#[derive(Debug, Clone, Default)]
pub(crate) enum ErrorContext {
    #[default]
    None,
    Zone(String),
    Record { zone_id: String, name: String },
}

impl ErrorContext {
    const UNKNOWN: &'static str = "<unknown>";

    pub fn zone_name(&self) -> String {
        match self {
            Self::Zone(zone) | Self::Record { zone_id: zone, .. } => zone.clone(),
            Self::None => Self::UNKNOWN.to_string(),
        }
    }

    pub fn record_name(&self) -> String {
        match self {
            Self::Record { name, .. } => name.clone(),
            _ => Self::UNKNOWN.to_string(),
        }
    }
}

/// Provider 错误映射（内部使用）
pub(crate) trait ProviderErrorMapper {
    /// Provider 标识符，写入每个错误的 `provider` 字段
    const PROVIDER: &'static str;

    /// 按错误码映射；未识别的错误码落到 [`ProviderError::Unknown`]
    fn map_error(&self, raw: RawApiError, context: &ErrorContext) -> ProviderError;

    fn parse_error(detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: Self::PROVIDER.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// DNS 提供商 Trait
///
/// 只包含域名接入流程需要的能力：创建 Zone、查找 Zone、创建记录。
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Token 是否有效。网络或接口错误时返回 `Ok(false)` 并记录日志。
    async fn validate_credentials(&self) -> Result<bool>;

    /// 创建托管 Zone
    ///
    /// Zone 已存在时返回 [`ProviderError::ZoneExists`]。
    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<ProviderZone>;

    /// 按名称查找 Zone，不存在时返回 `Ok(None)`
    async fn find_zone(&self, name: &str) -> Result<Option<ProviderZone>>;

    /// 在已存在的 Zone 中创建一条记录
    async fn create_record(&self, req: &CreateDnsRecordRequest) -> Result<DnsRecord>;
}
