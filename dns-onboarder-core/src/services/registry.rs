//! 域名注册表
//!
//! 持有 pending / active / removed 三个集合，以及它们之间的迁移规则。
//! 锁顺序固定为 pending → active → removed。

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::traits::{ActiveDomainStore, DelegationVerifier, NameListStore, ZoneProvisioner};
use crate::types::{ActivePassReport, DomainRecord, PendingPassReport, StatusSnapshot};

/// 三个集合各自的持久化句柄
#[derive(Clone)]
pub struct RegistryStores {
    pub active: Arc<dyn ActiveDomainStore>,
    pub pending: Arc<dyn NameListStore>,
    pub removed: Arc<dyn NameListStore>,
}

/// 单个 active 条目在一轮对账中的结论
enum ActiveOutcome {
    Refresh(bool),
    Evict,
}

/// Domain registry
///
/// 集合只能通过这里的方法读写。扫描并修改某个集合的一轮对账会在整个过程中
/// 持有该集合的写锁（包括其中的网络调用），持久化也在写锁内完成。
pub struct DomainRegistry {
    pending: RwLock<Vec<String>>,
    active: RwLock<Vec<DomainRecord>>,
    removed: RwLock<Vec<String>>,
    stores: RegistryStores,
}

impl DomainRegistry {
    /// 创建空注册表（不读取存储）
    #[must_use]
    pub fn new(stores: RegistryStores) -> Self {
        Self {
            pending: RwLock::new(Vec::new()),
            active: RwLock::new(Vec::new()),
            removed: RwLock::new(Vec::new()),
            stores,
        }
    }

    /// 从存储加载三个集合
    ///
    /// 加载失败只记录日志，对应集合为空。
    pub async fn load(stores: RegistryStores) -> Self {
        let active = stores.active.load().await.unwrap_or_else(|e| {
            log::error!("Failed to load active domains, starting empty: {e}");
            Vec::new()
        });
        let pending = stores.pending.load().await.unwrap_or_else(|e| {
            log::error!("Failed to load pending domains, starting empty: {e}");
            Vec::new()
        });
        let removed = stores.removed.load().await.unwrap_or_else(|e| {
            log::error!("Failed to load removed domains, starting empty: {e}");
            Vec::new()
        });

        log::info!(
            "Registry loaded: {} active, {} pending, {} removed",
            active.len(),
            pending.len(),
            removed.len()
        );

        Self {
            pending: RwLock::new(pending),
            active: RwLock::new(active),
            removed: RwLock::new(removed),
            stores,
        }
    }

    // ===== 只读快照 =====

    pub async fn snapshot_active(&self) -> Vec<DomainRecord> {
        self.active.read().await.clone()
    }

    pub async fn snapshot_pending(&self) -> Vec<String> {
        self.pending.read().await.clone()
    }

    pub async fn snapshot_removed(&self) -> Vec<String> {
        self.removed.read().await.clone()
    }

    /// 三个集合的一致快照
    ///
    /// 按锁顺序依次持有读锁，同一个名字不会同时出现在 pending 和 active 中。
    pub async fn snapshot_status(&self) -> StatusSnapshot {
        let pending = self.pending.read().await;
        let active = self.active.read().await;
        let removed = self.removed.read().await;
        StatusSnapshot {
            active: active.clone(),
            pending: pending.clone(),
            removed_count: removed.len(),
        }
    }

    // ===== 变更 =====

    /// 追加到 pending 队列并持久化
    ///
    /// 不做去重，也不做校验（由提交入口负责）。
    pub async fn enqueue_pending(&self, name: String) {
        let mut pending = self.pending.write().await;
        log::info!("Queued {name} for delegation check");
        pending.push(name);
        self.persist_pending(&pending).await;
    }

    /// 对 active 集合执行一轮对账
    ///
    /// 只有标记从 true 变为 false 的条目会被移入 removed；其余条目原地更新
    /// 标记和时间戳（已经是 false 且仍失败的条目保持在 active 中）。
    pub async fn reconcile_active_once(
        &self,
        verifier: &dyn DelegationVerifier,
    ) -> ActivePassReport {
        let mut active = self.active.write().await;

        // 先收集每个条目的结论，再统一修改集合
        let mut outcomes = Vec::with_capacity(active.len());
        for record in active.iter() {
            let verified = verifier.verify(&record.name).await;
            if !verified && record.delegation_verified {
                outcomes.push(ActiveOutcome::Evict);
            } else {
                outcomes.push(ActiveOutcome::Refresh(verified));
            }
        }

        let now = Utc::now();
        let mut report = ActivePassReport {
            checked: outcomes.len(),
            ..ActivePassReport::default()
        };
        let mut evicted: Vec<String> = Vec::new();
        let mut kept: Vec<DomainRecord> = Vec::with_capacity(active.len());

        for (mut record, outcome) in active.drain(..).zip(outcomes) {
            match outcome {
                ActiveOutcome::Evict => {
                    log::warn!("Delegation lost for {}, moving to removed", record.name);
                    evicted.push(record.name);
                }
                ActiveOutcome::Refresh(verified) => {
                    if verified != record.delegation_verified {
                        log::info!("Delegation for {} is now {verified}", record.name);
                    }
                    record.record_check(verified, now);
                    kept.push(record);
                }
            }
        }
        *active = kept;

        report.refreshed = active.len();
        report.evicted = evicted.len();

        if !evicted.is_empty() {
            let mut removed = self.removed.write().await;
            removed.extend(evicted);
            self.persist_removed(&removed).await;
        }
        self.persist_active(&active).await;

        report
    }

    /// 对 pending 队列执行一轮对账
    ///
    /// 委派正确且开通成功的名字从 pending 移入 active（标记为 true，时间为当前）。
    pub async fn reconcile_pending_once(
        &self,
        verifier: &dyn DelegationVerifier,
        provisioner: &dyn ZoneProvisioner,
    ) -> PendingPassReport {
        let mut pending = self.pending.write().await;

        let mut graduated = vec![false; pending.len()];
        for (idx, name) in pending.iter().enumerate() {
            if !verifier.verify(name).await {
                log::debug!("{name} is not delegated yet");
                continue;
            }
            if provisioner.provision(name).await {
                graduated[idx] = true;
            } else {
                log::warn!("Provisioning {name} failed, will retry next pass");
            }
        }

        let report = PendingPassReport {
            checked: pending.len(),
            graduated: graduated.iter().filter(|g| **g).count(),
        };

        if report.graduated > 0 {
            let now = Utc::now();
            let mut still_pending = Vec::with_capacity(pending.len() - report.graduated);
            let mut active = self.active.write().await;

            for (name, done) in pending.drain(..).zip(graduated) {
                if !done {
                    still_pending.push(name);
                    continue;
                }
                if active.iter().any(|r| r.name == name) {
                    log::warn!("{name} graduated but is already active, keeping both entries");
                }
                log::info!("{name} onboarded, now active");
                active.push(DomainRecord::graduated(name, now));
            }
            *pending = still_pending;

            self.persist_active(&active).await;
        }
        self.persist_pending(&pending).await;

        report
    }

    // ===== 持久化 =====

    async fn persist_active(&self, active: &[DomainRecord]) {
        if let Err(e) = self.stores.active.save(active).await {
            log::error!("Failed to persist active domains: {e}");
        }
    }

    async fn persist_pending(&self, pending: &[String]) {
        if let Err(e) = self.stores.pending.save(pending).await {
            log::error!("Failed to persist pending domains: {e}");
        }
    }

    async fn persist_removed(&self, removed: &[String]) {
        if let Err(e) = self.stores.removed.save(removed).await {
            log::error!("Failed to persist removed domains: {e}");
        }
    }
}
