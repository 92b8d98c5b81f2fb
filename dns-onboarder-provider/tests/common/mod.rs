//! 共享测试工具和辅助函数

#![allow(dead_code)]

use dns_onboarder_provider::CloudflareProvider;
use wiremock::MockServer;

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const TEST_TOKEN: &str = "test-token-0123456789";

/// 测试上下文 - 本地模拟的 Cloudflare API 和指向它的 Provider
pub struct TestContext {
    pub server: MockServer,
    pub provider: CloudflareProvider,
}

impl TestContext {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let provider = CloudflareProvider::with_base_url(TEST_TOKEN.to_string(), server.uri());
        Self { server, provider }
    }
}

/// Cloudflare 成功响应信封
pub fn cf_success(result: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result,
    })
}

/// Cloudflare 失败响应信封
pub fn cf_failure(code: i32, message: &str) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "errors": [{ "code": code, "message": message }],
        "messages": [],
        "result": null,
    })
}

pub fn zone_json(id: &str, name: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "status": status,
        "name_servers": ["ian.ns.cloudflare.com", "vera.ns.cloudflare.com"],
    })
}
