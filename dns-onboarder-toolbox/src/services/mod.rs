//! Stateless service façade exposing the toolbox operations.
//!
//! [`ToolboxService`] methods are async associated functions; no instance needed.
//! [`NameserverLookup`] is the injectable seam used by the delegation verifier.

mod nameserver;
mod resolver;

use std::net::IpAddr;

use async_trait::async_trait;

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::NameserverLookupResult;

/// 域名最大长度
const MAX_DOMAIN_LEN: usize = 253;

/// Validate and normalise a domain name input.
///
/// Trims whitespace and rejects empty, overlong, or whitespace-containing names.
fn validate_domain(domain: &str) -> ToolboxResult<String> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(ToolboxError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    if domain.len() > MAX_DOMAIN_LEN {
        return Err(ToolboxError::ValidationError(format!(
            "Domain name exceeds maximum length of {MAX_DOMAIN_LEN} characters (got {})",
            domain.len()
        )));
    }
    if domain.chars().any(char::is_whitespace) {
        return Err(ToolboxError::ValidationError(format!(
            "Invalid domain name: {domain}"
        )));
    }
    Ok(domain.to_string())
}

/// Entry point for delegation lookups.
///
/// ```rust,no_run
/// use dns_onboarder_toolbox::ToolboxService;
/// # async fn demo() -> dns_onboarder_toolbox::ToolboxResult<()> {
/// let ns = ToolboxService::nameserver_lookup("example.com", "1.1.1.1").await?;
/// println!("{:?}", ns.nameservers);
/// # Ok(())
/// # }
/// ```
pub struct ToolboxService;

impl ToolboxService {
    /// Resolve the NS records of `domain` through the recursive resolver at `nameserver`.
    ///
    /// Hostnames are returned in response order as fully-qualified names
    /// (with the trailing root dot). Resolution failures are returned as
    /// [`ToolboxError::NetworkError`] or [`ToolboxError::NoRecords`].
    pub async fn nameserver_lookup(
        domain: &str,
        nameserver: &str,
    ) -> ToolboxResult<NameserverLookupResult> {
        let domain = validate_domain(domain)?;
        let ns_ip = resolver::parse_resolver_ip(nameserver).ok_or_else(|| {
            ToolboxError::ValidationError(format!("无效的 DNS 服务器地址: {nameserver}"))
        })?;

        let resolver = resolver::build_resolver_for_ns(ns_ip);
        let nameservers = nameserver::nameserver_lookup(&resolver, &domain, ns_ip).await?;

        Ok(NameserverLookupResult {
            domain,
            resolver: ns_ip.to_string(),
            nameservers,
        })
    }
}

/// NS 查询抽象，便于在校验逻辑中注入模拟解析器
#[async_trait]
pub trait NameserverLookup: Send + Sync {
    /// 返回 `domain` 的 NS 主机名（应答顺序）
    async fn lookup_ns(&self, domain: &str) -> ToolboxResult<Vec<String>>;
}

/// 基于 hickory 的实现，固定使用一个递归解析器
#[derive(Debug, Clone)]
pub struct ResolverNameserverLookup {
    nameserver: IpAddr,
}

impl ResolverNameserverLookup {
    pub fn new(nameserver: IpAddr) -> Self {
        Self { nameserver }
    }

    /// 从文本地址构造
    pub fn parse(nameserver: &str) -> ToolboxResult<Self> {
        resolver::parse_resolver_ip(nameserver)
            .map(Self::new)
            .ok_or_else(|| {
                ToolboxError::ValidationError(format!("无效的 DNS 服务器地址: {nameserver}"))
            })
    }

    pub fn nameserver(&self) -> IpAddr {
        self.nameserver
    }
}

#[async_trait]
impl NameserverLookup for ResolverNameserverLookup {
    async fn lookup_ns(&self, domain: &str) -> ToolboxResult<Vec<String>> {
        // 每次查询新建解析器，避免缓存掩盖委派变更
        let domain = validate_domain(domain)?;
        let resolver = resolver::build_resolver_for_ns(self.nameserver);
        nameserver::nameserver_lookup(&resolver, &domain, self.nameserver).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain_normal() {
        assert_eq!(validate_domain("example.com").unwrap(), "example.com");
    }

    #[test]
    fn test_validate_domain_trims_whitespace() {
        assert_eq!(validate_domain("  example.com  ").unwrap(), "example.com");
    }

    #[test]
    fn test_validate_domain_empty() {
        assert!(matches!(
            validate_domain("   "),
            Err(ToolboxError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_domain_inner_whitespace() {
        assert!(matches!(
            validate_domain("exa mple.com"),
            Err(ToolboxError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_domain_too_long() {
        let long = format!("{}.com", "a".repeat(260));
        assert!(matches!(
            validate_domain(&long),
            Err(ToolboxError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_nameserver_lookup_rejects_bad_resolver() {
        let result = ToolboxService::nameserver_lookup("example.com", "not-an-ip").await;
        assert!(matches!(result, Err(ToolboxError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_resolver_lookup_rejects_empty_domain_before_network() {
        let lookup = ResolverNameserverLookup::parse("1.1.1.1").unwrap();
        let result = lookup.lookup_ns("").await;
        assert!(matches!(result, Err(ToolboxError::ValidationError(_))));
    }

    #[test]
    fn test_resolver_lookup_parse() {
        let lookup = ResolverNameserverLookup::parse("1.1.1.1").unwrap();
        assert_eq!(lookup.nameserver().to_string(), "1.1.1.1");
        assert!(ResolverNameserverLookup::parse("").is_err());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_live_nameserver_lookup() {
        let result = ToolboxService::nameserver_lookup("cloudflare.com", "1.1.1.1")
            .await
            .unwrap();
        assert!(!result.nameservers.is_empty());
        assert!(result.nameservers.iter().all(|ns| ns.ends_with('.')));
    }
}
