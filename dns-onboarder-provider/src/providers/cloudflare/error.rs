//! Cloudflare error mapping
//!
//! Reference: <https://developers.cloudflare.com/fundamentals/api/reference/errors/>

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareProvider;

/// 认证失败：请求头无效、Authorization 格式错误、无权访问、认证错误
const AUTH_CODES: [i64; 5] = [6003, 6103, 6111, 9109, 10_000];
/// `<zone> already exists`
const ZONE_EXISTS: i64 = 1061;
/// 同名记录已存在（A/AAAA/CNAME 冲突、完全相同的记录等）
const RECORD_EXISTS: std::ops::RangeInclusive<i64> = 81_053..=81_058;
const RECORD_QUOTA: i64 = 81_045;
/// 无法路由到该 Zone（ID 无效）
const ZONE_NOT_ROUTABLE: [i64; 2] = [7000, 7003];

/// 参数类错误对应的请求字段
fn invalid_param(code: i64) -> Option<&'static str> {
    match code {
        // 1049: not a registered domain, 9000: invalid or missing name
        1049 | 9000 => Some("name"),
        1004 => Some("general"),
        9005 | 9006 | 9009 => Some("content"),
        9021 => Some("ttl"),
        9041 => Some("proxied"),
        _ => None,
    }
}

impl ProviderErrorMapper for CloudflareProvider {
    const PROVIDER: &'static str = "cloudflare";

    fn map_error(&self, raw: RawApiError, context: &ErrorContext) -> ProviderError {
        let provider = Self::PROVIDER.to_string();
        let Some(code) = raw.code else {
            return ProviderError::Unknown {
                provider,
                raw_code: None,
                raw_message: raw.message,
            };
        };

        if AUTH_CODES.contains(&code) {
            return ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            };
        }
        if let Some(param) = invalid_param(code) {
            return ProviderError::InvalidParameter {
                provider,
                param: param.to_string(),
                detail: raw.message,
            };
        }

        match code {
            ZONE_EXISTS => ProviderError::ZoneExists {
                provider,
                zone: context.zone_name(),
                raw_message: Some(raw.message),
            },
            c if RECORD_EXISTS.contains(&c) => ProviderError::RecordExists {
                provider,
                record_name: context.record_name(),
                raw_message: Some(raw.message),
            },
            RECORD_QUOTA => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },
            c if ZONE_NOT_ROUTABLE.contains(&c) => ProviderError::ZoneNotFound {
                provider,
                zone: context.zone_name(),
                raw_message: Some(raw.message),
            },
            c => ProviderError::Unknown {
                provider,
                raw_code: Some(c.to_string()),
                raw_message: raw.message,
            },
        }
    }
}
