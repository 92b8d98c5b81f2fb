//! Cloudflare HTTP 请求方法

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;
use crate::http_client;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        self.call::<T, ()>(Method::GET, path, None, context).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        self.call(Method::POST, path, Some(body), context).await
    }

    async fn call<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.api_token);

        if let Some(body) = body {
            if log::log_enabled!(log::Level::Debug) {
                if let Ok(json) = serde_json::to_string(body) {
                    log::debug!("[{}] Request body: {json}", Self::PROVIDER);
                }
            }
            request = request.json(body);
        }

        let text = http_client::send(request, Self::PROVIDER, method.as_str(), &url).await?;
        self.unwrap_envelope(&text, &context)
    }

    /// 解析响应信封：`success=false` 时映射第一条错误
    fn unwrap_envelope<T: DeserializeOwned>(&self, text: &str, context: &ErrorContext) -> Result<T> {
        let envelope: CloudflareResponse<T> = http_client::decode_json(text, Self::PROVIDER)?;

        if !envelope.success {
            let raw = envelope
                .errors
                .into_iter()
                .flatten()
                .next()
                .map_or_else(
                    || RawApiError::new(None, "Unknown error"),
                    |e| RawApiError::new(Some(i64::from(e.code)), e.message),
                );
            log::debug!("[{}] API error {:?}: {}", Self::PROVIDER, raw.code, raw.message);
            return Err(self.map_error(raw, context));
        }

        envelope
            .result
            .ok_or_else(|| Self::parse_error("响应中缺少 result 字段"))
    }
}
