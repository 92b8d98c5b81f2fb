//! NS 查询模块

use std::net::IpAddr;

use hickory_resolver::TokioResolver;

use crate::error::{ToolboxError, ToolboxResult};

/// 查询域名的 NS 记录，按应答顺序返回主机名
///
/// 与诊断型查询不同，解析失败不会被吞掉：调用方需要区分“没有委派”和“查不到”。
pub async fn nameserver_lookup(
    resolver: &TokioResolver,
    domain: &str,
    resolver_ip: IpAddr,
) -> ToolboxResult<Vec<String>> {
    let response = resolver.ns_lookup(domain).await.map_err(|e| {
        if e.is_no_records_found() {
            ToolboxError::NoRecords(format!("{domain} NS via {resolver_ip}: {e}"))
        } else {
            ToolboxError::NetworkError(format!("{domain} NS via {resolver_ip}: {e}"))
        }
    })?;

    let nameservers: Vec<String> = response.iter().map(|ns| ns.0.to_string()).collect();
    log::debug!("NS {domain} via {resolver_ip}: {nameservers:?}");

    if nameservers.is_empty() {
        return Err(ToolboxError::NoRecords(format!(
            "{domain} NS via {resolver_ip}: empty answer"
        )));
    }
    Ok(nameservers)
}
