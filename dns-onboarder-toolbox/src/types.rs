//! 工具箱返回类型

use serde::Serialize;

/// NS 查询结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameserverLookupResult {
    /// 查询的域名（已校验）
    pub domain: String,
    /// 应答所用的递归解析器
    pub resolver: String,
    /// 应答中的 NS 主机名，保持应答顺序，带根点
    pub nameservers: Vec<String>,
}
