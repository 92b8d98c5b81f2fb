//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dns_onboarder_provider::{
    CreateDnsRecordRequest, CreateZoneRequest, DnsProvider, DnsRecord, ProviderError,
    ProviderType, ProviderZone, ZoneStatus,
};
use dns_onboarder_toolbox::{NameserverLookup, ToolboxError, ToolboxResult};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{DomainRegistry, RecordTable, RegistryStores};
use crate::traits::{
    ActiveDomainStore, DelegationVerifier, NameListStore, RecordTemplateSource, ZoneProvisioner,
};
use crate::types::DomainRecord;

// ===== MockActiveStore / MockNameListStore =====

/// 内存存储：`seed` 设置已持久化的内容，`save` 覆盖它
pub struct MockStore<T> {
    data: RwLock<Vec<T>>,
    save_count: RwLock<usize>,
    /// 如果 Some，load 时返回此错误
    load_error: RwLock<Option<String>>,
    /// 如果 Some，save 时返回此错误
    save_error: RwLock<Option<String>>,
}

impl<T: Clone> MockStore<T> {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Vec::new()),
            save_count: RwLock::new(0),
            load_error: RwLock::new(None),
            save_error: RwLock::new(None),
        }
    }

    pub async fn seed(&self, items: Vec<T>) {
        *self.data.write().await = items;
    }

    /// 最近一次成功保存（或 seed）的内容
    pub async fn saved(&self) -> Vec<T> {
        self.data.read().await.clone()
    }

    pub async fn save_count(&self) -> usize {
        *self.save_count.read().await
    }

    pub async fn set_load_error(&self, err: Option<String>) {
        *self.load_error.write().await = err;
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    async fn load_items(&self) -> CoreResult<Vec<T>> {
        if let Some(ref msg) = *self.load_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        Ok(self.data.read().await.clone())
    }

    async fn save_items(&self, items: &[T]) -> CoreResult<()> {
        *self.save_count.write().await += 1;
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        *self.data.write().await = items.to_vec();
        Ok(())
    }
}

pub type MockActiveStore = MockStore<DomainRecord>;
pub type MockNameListStore = MockStore<String>;

#[async_trait]
impl ActiveDomainStore for MockStore<DomainRecord> {
    async fn load(&self) -> CoreResult<Vec<DomainRecord>> {
        self.load_items().await
    }

    async fn save(&self, domains: &[DomainRecord]) -> CoreResult<()> {
        self.save_items(domains).await
    }
}

#[async_trait]
impl NameListStore for MockStore<String> {
    async fn load(&self) -> CoreResult<Vec<String>> {
        self.load_items().await
    }

    async fn save(&self, names: &[String]) -> CoreResult<()> {
        self.save_items(names).await
    }
}

/// 三个集合的 mock 存储
pub struct TestStores {
    pub active: Arc<MockActiveStore>,
    pub pending: Arc<MockNameListStore>,
    pub removed: Arc<MockNameListStore>,
}

impl TestStores {
    pub fn new() -> Self {
        Self {
            active: Arc::new(MockStore::new()),
            pending: Arc::new(MockStore::new()),
            removed: Arc::new(MockStore::new()),
        }
    }

    pub fn registry_stores(&self) -> RegistryStores {
        RegistryStores {
            active: self.active.clone(),
            pending: self.pending.clone(),
            removed: self.removed.clone(),
        }
    }
}

// ===== MockDelegationVerifier / MockProvisioner =====

/// 按名字返回预设结果的 mock，并记录调用顺序
pub struct MockDecision {
    default: bool,
    overrides: RwLock<HashMap<String, bool>>,
    calls: RwLock<Vec<String>>,
}

impl MockDecision {
    pub fn all(default: bool) -> Self {
        Self {
            default,
            overrides: RwLock::new(HashMap::new()),
            calls: RwLock::new(Vec::new()),
        }
    }

    pub async fn set(&self, name: &str, value: bool) {
        self.overrides
            .write()
            .await
            .insert(name.to_string(), value);
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    async fn decide(&self, name: &str) -> bool {
        self.calls.write().await.push(name.to_string());
        self.overrides
            .read()
            .await
            .get(name)
            .copied()
            .unwrap_or(self.default)
    }
}

pub type MockDelegationVerifier = MockDecision;

/// 与 [`MockDelegationVerifier`] 相同的行为，用于开通步骤
pub struct MockProvisioner(MockDecision);

impl MockProvisioner {
    pub fn all(default: bool) -> Self {
        Self(MockDecision::all(default))
    }

    pub async fn set(&self, name: &str, value: bool) {
        self.0.set(name, value).await;
    }

    pub async fn calls(&self) -> Vec<String> {
        self.0.calls().await
    }
}

#[async_trait]
impl DelegationVerifier for MockDecision {
    async fn verify(&self, name: &str) -> bool {
        self.decide(name).await
    }
}

#[async_trait]
impl ZoneProvisioner for MockProvisioner {
    async fn provision(&self, name: &str) -> bool {
        self.0.decide(name).await
    }
}

// ===== MockNameserverLookup =====

pub struct MockNameserverLookup {
    answers: RwLock<HashMap<String, Result<Vec<String>, String>>>,
    calls: RwLock<usize>,
}

impl MockNameserverLookup {
    pub fn new() -> Self {
        Self {
            answers: RwLock::new(HashMap::new()),
            calls: RwLock::new(0),
        }
    }

    pub async fn answer(&self, domain: &str, nameservers: &[&str]) {
        self.answers.write().await.insert(
            domain.to_string(),
            Ok(nameservers.iter().map(ToString::to_string).collect()),
        );
    }

    pub async fn fail(&self, domain: &str, message: &str) {
        self.answers
            .write()
            .await
            .insert(domain.to_string(), Err(message.to_string()));
    }

    pub async fn call_count(&self) -> usize {
        *self.calls.read().await
    }
}

#[async_trait]
impl NameserverLookup for MockNameserverLookup {
    async fn lookup_ns(&self, domain: &str) -> ToolboxResult<Vec<String>> {
        *self.calls.write().await += 1;
        match self.answers.read().await.get(domain) {
            Some(Ok(nameservers)) => Ok(nameservers.clone()),
            Some(Err(message)) => Err(ToolboxError::NetworkError(message.clone())),
            None => Err(ToolboxError::NoRecords(domain.to_string())),
        }
    }
}

// ===== MockDnsProvider =====

pub struct MockDnsProvider {
    fail_zone_creation: RwLock<bool>,
    existing_zones: RwLock<HashSet<String>>,
    failing_records: RwLock<HashSet<String>>,
    created_zones: RwLock<Vec<String>>,
    zone_accounts: RwLock<Vec<Option<String>>>,
    created_records: RwLock<Vec<CreateDnsRecordRequest>>,
    record_attempts: RwLock<usize>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            fail_zone_creation: RwLock::new(false),
            existing_zones: RwLock::new(HashSet::new()),
            failing_records: RwLock::new(HashSet::new()),
            created_zones: RwLock::new(Vec::new()),
            zone_accounts: RwLock::new(Vec::new()),
            created_records: RwLock::new(Vec::new()),
            record_attempts: RwLock::new(0),
        }
    }

    pub async fn fail_zone_creation(&self) {
        *self.fail_zone_creation.write().await = true;
    }

    pub async fn add_existing_zone(&self, name: &str) {
        self.existing_zones.write().await.insert(name.to_string());
    }

    /// 名为 `record_name` 的记录创建时返回 `RecordExists`
    pub async fn fail_record(&self, record_name: &str) {
        self.failing_records
            .write()
            .await
            .insert(record_name.to_string());
    }

    pub async fn created_zones(&self) -> Vec<String> {
        self.created_zones.read().await.clone()
    }

    pub async fn zone_accounts(&self) -> Vec<Option<String>> {
        self.zone_accounts.read().await.clone()
    }

    pub async fn created_records(&self) -> Vec<CreateDnsRecordRequest> {
        self.created_records.read().await.clone()
    }

    pub async fn record_attempts(&self) -> usize {
        *self.record_attempts.read().await
    }

    fn zone(name: &str) -> ProviderZone {
        ProviderZone {
            id: format!("zone-{name}"),
            name: name.to_string(),
            provider: ProviderType::Cloudflare,
            status: ZoneStatus::Pending,
            name_servers: expected_nameservers(),
        }
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn validate_credentials(&self) -> dns_onboarder_provider::Result<bool> {
        Ok(true)
    }

    async fn create_zone(
        &self,
        req: &CreateZoneRequest,
    ) -> dns_onboarder_provider::Result<ProviderZone> {
        self.zone_accounts
            .write()
            .await
            .push(req.account_id.clone());

        if *self.fail_zone_creation.read().await {
            return Err(ProviderError::NetworkError {
                provider: "mock".to_string(),
                detail: "connection refused".to_string(),
            });
        }
        if self.existing_zones.read().await.contains(&req.name) {
            return Err(ProviderError::ZoneExists {
                provider: "mock".to_string(),
                zone: req.name.clone(),
                raw_message: None,
            });
        }

        self.created_zones.write().await.push(req.name.clone());
        Ok(Self::zone(&req.name))
    }

    async fn find_zone(&self, name: &str) -> dns_onboarder_provider::Result<Option<ProviderZone>> {
        let known = self.existing_zones.read().await.contains(name)
            || self.created_zones.read().await.iter().any(|z| z == name);
        Ok(known.then(|| Self::zone(name)))
    }

    async fn create_record(
        &self,
        req: &CreateDnsRecordRequest,
    ) -> dns_onboarder_provider::Result<DnsRecord> {
        *self.record_attempts.write().await += 1;

        if self.failing_records.read().await.contains(&req.name) {
            return Err(ProviderError::RecordExists {
                provider: "mock".to_string(),
                record_name: req.name.clone(),
                raw_message: None,
            });
        }

        let mut created = self.created_records.write().await;
        created.push(req.clone());
        Ok(DnsRecord {
            id: format!("rec-{}", created.len()),
            zone_id: req.zone_id.clone(),
            record_type: req.record_type,
            name: req.name.clone(),
            content: req.content.clone(),
            ttl: req.ttl,
            proxied: req.proxied,
        })
    }
}

// ===== MockRecordSource =====

pub struct MockRecordSource {
    content: Result<String, String>,
    loads: RwLock<usize>,
}

impl MockRecordSource {
    pub fn with_table(content: &str) -> Self {
        Self {
            content: Ok(content.to_string()),
            loads: RwLock::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            content: Err(message.to_string()),
            loads: RwLock::new(0),
        }
    }

    pub async fn load_count(&self) -> usize {
        *self.loads.read().await
    }
}

#[async_trait]
impl RecordTemplateSource for MockRecordSource {
    async fn load(&self) -> CoreResult<RecordTable> {
        *self.loads.write().await += 1;
        match &self.content {
            Ok(content) => RecordTable::parse(content),
            Err(message) => Err(CoreError::RecordTableError(message.clone())),
        }
    }
}

// ===== 工厂方法 =====

/// 期望的 Cloudflare 名称服务器
pub fn expected_nameservers() -> Vec<String> {
    vec![
        "ian.ns.cloudflare.com.".to_string(),
        "vera.ns.cloudflare.com.".to_string(),
    ]
}

/// 一小时前检查过的 active 条目
pub fn active_record(name: &str, verified: bool) -> DomainRecord {
    DomainRecord::new(name, verified, Utc::now() - Duration::hours(1))
}

/// 创建使用空 mock 存储的注册表
pub async fn create_test_registry() -> (DomainRegistry, TestStores) {
    let stores = TestStores::new();
    let registry = DomainRegistry::load(stores.registry_stores()).await;
    (registry, stores)
}
