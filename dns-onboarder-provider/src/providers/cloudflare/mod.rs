//! Cloudflare provider (API v4, bearer token)

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;
use crate::utils::log_sanitizer::mask_secret;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareZone};

const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Cloudflare API client
pub struct CloudflareProvider {
    client: Client,
    api_token: String,
    base_url: String,
}

impl CloudflareProvider {
    pub fn new(api_token: String) -> Self {
        Self::with_base_url(api_token, CF_API_BASE)
    }

    /// 使用自定义 API 地址（测试或代理场景）
    pub fn with_base_url(api_token: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        log::debug!("Cloudflare client for {base_url} (token {})", mask_secret(&api_token));
        Self {
            client: create_http_client(),
            api_token,
            base_url,
        }
    }
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("base_url", &self.base_url)
            .field("api_token", &mask_secret(&self.api_token))
            .finish_non_exhaustive()
    }
}
