use serde::Serialize;
use thiserror::Error;

/// Error returned by every provider operation.
///
/// Variants carry the provider id so log lines stay attributable once the
/// error has crossed into the onboarding layer.
///
/// Nothing here is retried by the client. [`is_transient`](Self::is_transient)
/// marks the failures a later reconciliation pass may get past.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection refused, DNS failure, or a gateway error (HTTP 502-504).
    #[error("[{provider}] Network error: {detail}")]
    NetworkError { provider: String, detail: String },

    #[error("[{provider}] Request timeout: {detail}")]
    Timeout { provider: String, detail: String },

    /// HTTP 429.
    #[error("[{provider}] Rate limited{}", retry_hint(*.retry_after))]
    RateLimited {
        provider: String,
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    #[error("[{provider}] Invalid credentials{}", suffix(.raw_message))]
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// The zone is already hosted (by this or another account).
    #[error("[{provider}] Zone '{zone}' already exists")]
    ZoneExists {
        provider: String,
        zone: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] Zone '{zone}' not found{}", suffix(.raw_message))]
    ZoneNotFound {
        provider: String,
        zone: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] Record '{record_name}' already exists")]
    RecordExists {
        provider: String,
        record_name: String,
        raw_message: Option<String>,
    },

    /// `param` names the offending request field (`name`, `content`, `ttl`, ...).
    #[error("[{provider}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    /// Account-level limit. Not transient.
    #[error("[{provider}] Quota exceeded{}", suffix(.raw_message))]
    QuotaExceeded {
        provider: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] Parse error: {detail}")]
    ParseError { provider: String, detail: String },

    /// API error code with no dedicated variant.
    #[error("[{provider}] {raw_message}")]
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

fn retry_hint(retry_after: Option<u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry after {secs}s)"))
        .unwrap_or_default()
}

impl ProviderError {
    /// 是否为预期行为（资源已存在、参数不合法等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::ZoneExists { .. }
                | Self::ZoneNotFound { .. }
                | Self::RecordExists { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
        )
    }

    /// 是否为瞬时错误（网络、超时、限流），下一轮对账时可能成功
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
