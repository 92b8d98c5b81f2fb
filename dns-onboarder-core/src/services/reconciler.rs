//! 对账循环
//!
//! 两个独立的后台任务：active 集合每 3 小时复查一次委派，pending 队列每小时尝试开通一次。
//! 启动后立即执行第一轮，之后按间隔休眠，随进程一直运行。

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::services::DomainRegistry;
use crate::traits::{DelegationVerifier, ZoneProvisioner};
use crate::types::{ActivePassReport, PendingPassReport};

/// 默认 active 复查间隔（3 小时）
const DEFAULT_ACTIVE_INTERVAL: Duration = Duration::from_secs(3 * 60 * 60);
/// 默认 pending 处理间隔（1 小时）
const DEFAULT_PENDING_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// 两个循环的间隔
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileIntervals {
    pub active: Duration,
    pub pending: Duration,
}

impl Default for ReconcileIntervals {
    fn default() -> Self {
        Self {
            active: DEFAULT_ACTIVE_INTERVAL,
            pending: DEFAULT_PENDING_INTERVAL,
        }
    }
}

/// 驱动注册表的周期性对账
pub struct Reconciler {
    registry: Arc<DomainRegistry>,
    verifier: Arc<dyn DelegationVerifier>,
    provisioner: Arc<dyn ZoneProvisioner>,
    intervals: ReconcileIntervals,
}

impl Reconciler {
    #[must_use]
    pub fn new(
        registry: Arc<DomainRegistry>,
        verifier: Arc<dyn DelegationVerifier>,
        provisioner: Arc<dyn ZoneProvisioner>,
        intervals: ReconcileIntervals,
    ) -> Self {
        Self {
            registry,
            verifier,
            provisioner,
            intervals,
        }
    }

    /// 执行一轮 active 对账
    pub async fn run_active_pass(&self) -> ActivePassReport {
        let report = self
            .registry
            .reconcile_active_once(self.verifier.as_ref())
            .await;
        log::info!(
            "Active pass: {} checked, {} refreshed, {} evicted",
            report.checked,
            report.refreshed,
            report.evicted
        );
        report
    }

    /// 执行一轮 pending 对账
    pub async fn run_pending_pass(&self) -> PendingPassReport {
        let report = self
            .registry
            .reconcile_pending_once(self.verifier.as_ref(), self.provisioner.as_ref())
            .await;
        log::info!(
            "Pending pass: {} checked, {} graduated",
            report.checked,
            report.graduated
        );
        report
    }

    /// 启动 active 循环
    pub fn spawn_active_loop(self: &Arc<Self>) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            log::info!(
                "Active reconciliation every {}s",
                this.intervals.active.as_secs()
            );
            loop {
                this.run_active_pass().await;
                tokio::time::sleep(this.intervals.active).await;
            }
        })
    }

    /// 启动 pending 循环
    pub fn spawn_pending_loop(self: &Arc<Self>) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            log::info!(
                "Pending reconciliation every {}s",
                this.intervals.pending.as_secs()
            );
            loop {
                this.run_pending_pass().await;
                tokio::time::sleep(this.intervals.pending).await;
            }
        })
    }
}
