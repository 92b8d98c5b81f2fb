//! Resolver construction helpers.

use std::net::IpAddr;

use hickory_resolver::{
    TokioResolver,
    config::{NameServerConfigGroup, ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
};

/// Build a resolver that talks only to `ns_ip` on port 53 (UDP, then TCP on truncation).
///
/// The host's `/etc/resolv.conf` is deliberately not consulted, so the answer
/// reflects exactly what that recursive resolver sees.
pub(crate) fn build_resolver_for_ns(ns_ip: IpAddr) -> TokioResolver {
    let config = ResolverConfig::from_parts(
        None,
        vec![],
        NameServerConfigGroup::from_ips_clear(&[ns_ip], 53, true),
    );
    let provider = TokioConnectionProvider::default();
    TokioResolver::builder_with_config(config, provider)
        .with_options(ResolverOpts::default())
        .build()
}

/// Parse a resolver address given as text.
pub(crate) fn parse_resolver_ip(nameserver: &str) -> Option<IpAddr> {
    nameserver.trim().parse().ok()
}
