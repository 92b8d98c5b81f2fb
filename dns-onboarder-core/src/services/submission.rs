//! 域名提交入口

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::DomainRegistry;

/// 接收外部提交的域名并放入 pending 队列
///
/// 拒绝空名字以及含空白或控制字符的名字（pending 存储按行保存）；
/// 委派校验和开通都由 pending 循环完成，重复提交不去重。
pub struct SubmissionService {
    registry: Arc<DomainRegistry>,
}

impl SubmissionService {
    #[must_use]
    pub fn new(registry: Arc<DomainRegistry>) -> Self {
        Self { registry }
    }

    /// 提交域名（去掉首尾空白）
    pub async fn submit(&self, name: &str) -> CoreResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError("Domain is required".to_string()));
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(CoreError::ValidationError(
                "Domain must not contain whitespace or control characters".to_string(),
            ));
        }
        self.registry.enqueue_pending(name.to_string()).await;
        Ok(())
    }
}
