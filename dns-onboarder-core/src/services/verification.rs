//! 委派校验

use std::sync::Arc;

use async_trait::async_trait;
use dns_onboarder_toolbox::NameserverLookup;

use crate::traits::DelegationVerifier;

/// 判断域名的 NS 是否与期望列表一致
///
/// 比较按位置进行：长度必须相同，且每个位置的主机名相同（忽略根点和 ASCII 大小写）。
/// 查询出错一律视为不一致。
pub struct NameserverVerifier {
    lookup: Arc<dyn NameserverLookup>,
    expected: Vec<String>,
}

impl NameserverVerifier {
    #[must_use]
    pub fn new(lookup: Arc<dyn NameserverLookup>, expected: Vec<String>) -> Self {
        Self { lookup, expected }
    }

    fn matches_expected(&self, actual: &[String]) -> bool {
        actual.len() == self.expected.len()
            && actual
                .iter()
                .zip(&self.expected)
                .all(|(a, e)| same_host(a, e))
    }
}

fn same_host(a: &str, b: &str) -> bool {
    a.trim_end_matches('.')
        .eq_ignore_ascii_case(b.trim_end_matches('.'))
}

#[async_trait]
impl DelegationVerifier for NameserverVerifier {
    async fn verify(&self, name: &str) -> bool {
        match self.lookup.lookup_ns(name).await {
            Ok(actual) => {
                let ok = self.matches_expected(&actual);
                if !ok {
                    log::debug!(
                        "{name} delegates to {actual:?}, expected {:?}",
                        self.expected
                    );
                }
                ok
            }
            Err(e) => {
                log::warn!("NS lookup for {name} failed: {e}");
                false
            }
        }
    }
}
