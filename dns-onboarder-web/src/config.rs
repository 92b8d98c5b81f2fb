//! Service configuration
//!
//! 从 TOML 文件加载，每个字段都有默认值；文件不存在时整体使用默认值。

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use dns_onboarder_app::StoragePaths;
use dns_onboarder_core::ReconcileIntervals;
use serde::Deserialize;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "DNS_ONBOARDER_CONFIG";
/// Cloudflare API Token 的环境变量
pub const API_TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub delegation: DelegationConfig,
    pub reconcile: ReconcileConfig,
    pub cloudflare: CloudflareConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub active_path: PathBuf,
    pub pending_path: PathBuf,
    pub removed_path: PathBuf,
    pub record_table_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            active_path: PathBuf::from("domains.json"),
            pending_path: PathBuf::from("limbo_domains.txt"),
            removed_path: PathBuf::from("removed_domains.txt"),
            record_table_path: PathBuf::from("master.zone"),
        }
    }
}

impl StorageConfig {
    pub fn storage_paths(&self) -> StoragePaths {
        StoragePaths {
            active: self.active_path.clone(),
            pending: self.pending_path.clone(),
            removed: self.removed_path.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DelegationConfig {
    /// 用于 NS 查询的递归解析器 IP
    pub resolver: String,
    /// 期望的 NS 列表，顺序敏感
    pub expected_nameservers: Vec<String>,
}

impl Default for DelegationConfig {
    fn default() -> Self {
        Self {
            resolver: "1.1.1.1".to_string(),
            expected_nameservers: vec![
                "ian.ns.cloudflare.com.".to_string(),
                "vera.ns.cloudflare.com.".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileConfig {
    pub active_interval_secs: u64,
    pub pending_interval_secs: u64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        let defaults = ReconcileIntervals::default();
        Self {
            active_interval_secs: defaults.active.as_secs(),
            pending_interval_secs: defaults.pending.as_secs(),
        }
    }
}

impl ReconcileConfig {
    /// 间隔为 0 会让循环不停地查询解析器和 Cloudflare
    fn validate(&self) -> Result<()> {
        ensure!(
            self.active_interval_secs > 0,
            "reconcile.active_interval_secs must be greater than 0"
        );
        ensure!(
            self.pending_interval_secs > 0,
            "reconcile.pending_interval_secs must be greater than 0"
        );
        Ok(())
    }

    pub fn intervals(&self) -> ReconcileIntervals {
        ReconcileIntervals {
            active: Duration::from_secs(self.active_interval_secs),
            pending: Duration::from_secs(self.pending_interval_secs),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloudflareConfig {
    /// 仅在环境变量未设置时使用
    pub api_token: Option<String>,
    pub account_id: Option<String>,
}

impl CloudflareConfig {
    /// 环境变量优先，其次是配置文件；空值视为未设置
    pub fn resolve_api_token(&self, from_env: Option<String>) -> Option<String> {
        let usable = |t: String| {
            let t = t.trim().to_string();
            (!t.is_empty()).then_some(t)
        };
        from_env
            .and_then(usable)
            .or_else(|| self.api_token.clone().and_then(usable))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    /// 设置后额外按天滚动写入该目录
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            directory: None,
        }
    }
}

impl Config {
    /// 按 `DNS_ONBOARDER_CONFIG` 指定的路径加载（默认 `config.toml`）
    pub fn load_from_env() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.reconcile.validate()?;
        Ok(config)
    }

    pub fn api_token(&self) -> Option<String> {
        self.cloudflare
            .resolve_api_token(std::env::var(API_TOKEN_ENV).ok())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.storage.active_path, PathBuf::from("domains.json"));
        assert_eq!(config.storage.pending_path, PathBuf::from("limbo_domains.txt"));
        assert_eq!(config.storage.removed_path, PathBuf::from("removed_domains.txt"));
        assert_eq!(config.storage.record_table_path, PathBuf::from("master.zone"));
        assert_eq!(config.delegation.resolver, "1.1.1.1");
        assert_eq!(
            config.delegation.expected_nameservers,
            vec!["ian.ns.cloudflare.com.", "vera.ns.cloudflare.com."]
        );
        assert_eq!(config.reconcile.intervals(), ReconcileIntervals::default());
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            [server]
            listen = "127.0.0.1:9000"

            [reconcile]
            pending_interval_secs = 60

            [log]
            format = "json"
            directory = "logs"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.listen, "127.0.0.1:9000");
        assert_eq!(config.reconcile.pending_interval_secs, 60);
        assert_eq!(config.reconcile.active_interval_secs, 10_800);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.directory, Some(PathBuf::from("logs")));
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("[server]\nport = 8080\n").is_err());
    }

    #[test]
    fn zero_intervals_are_rejected() {
        for toml in [
            "[reconcile]\nactive_interval_secs = 0\n",
            "[reconcile]\npending_interval_secs = 0\n",
        ] {
            let err = Config::parse(toml).unwrap_err();
            assert!(err.to_string().contains("must be greater than 0"), "{err}");
        }
        assert!(Config::parse("[reconcile]\npending_interval_secs = 1\n").is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:8080");
    }

    #[test]
    fn environment_token_wins_over_file() {
        let cf = CloudflareConfig {
            api_token: Some("from-file".to_string()),
            account_id: None,
        };
        assert_eq!(
            cf.resolve_api_token(Some("from-env".to_string())).as_deref(),
            Some("from-env")
        );
        assert_eq!(cf.resolve_api_token(None).as_deref(), Some("from-file"));
        assert_eq!(
            CloudflareConfig::default().resolve_api_token(Some("  ".to_string())),
            None
        );
    }
}
