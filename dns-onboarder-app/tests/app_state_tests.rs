#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and `AppState` wiring.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dns_onboarder_app::{AppState, AppStateBuilder, StoragePaths};
use dns_onboarder_core::{CoreError, DelegationVerifier, ZoneProvisioner};
use dns_onboarder_toolbox::{NameserverLookup, ToolboxError, ToolboxResult};

// ===== Mock Implementations =====

/// Verifier with a fixed answer per name (unknown names are `false`).
#[derive(Default)]
struct FixedVerifier {
    answers: HashMap<String, bool>,
}

impl FixedVerifier {
    fn with(mut self, name: &str, verified: bool) -> Self {
        self.answers.insert(name.to_string(), verified);
        self
    }
}

#[async_trait]
impl DelegationVerifier for FixedVerifier {
    async fn verify(&self, name: &str) -> bool {
        self.answers.get(name).copied().unwrap_or(false)
    }
}

/// Provisioner that always succeeds and counts calls.
#[derive(Default)]
struct CountingProvisioner {
    calls: AtomicUsize,
}

#[async_trait]
impl ZoneProvisioner for CountingProvisioner {
    async fn provision(&self, _name: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        true
    }
}

/// Lookup answering from a static table.
struct StaticLookup(HashMap<String, Vec<String>>);

#[async_trait]
impl NameserverLookup for StaticLookup {
    async fn lookup_ns(&self, domain: &str) -> ToolboxResult<Vec<String>> {
        self.0
            .get(domain)
            .cloned()
            .ok_or_else(|| ToolboxError::NoRecords(domain.to_string()))
    }
}

fn paths_in(dir: &Path) -> StoragePaths {
    StoragePaths {
        active: dir.join("domains.json"),
        pending: dir.join("limbo_domains.txt"),
        removed: dir.join("removed_domains.txt"),
    }
}

// ===== Builder validation =====

#[tokio::test]
async fn build_requires_stores() {
    let result = AppStateBuilder::new()
        .verifier(Arc::new(FixedVerifier::default()))
        .provisioner(Arc::new(CountingProvisioner::default()))
        .build()
        .await;
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[tokio::test]
async fn build_requires_verifier() {
    let dir = tempfile::tempdir().unwrap();
    let result = AppStateBuilder::new()
        .stores(paths_in(dir.path()).into_stores())
        .provisioner(Arc::new(CountingProvisioner::default()))
        .build()
        .await;
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[tokio::test]
async fn build_requires_provisioner() {
    let dir = tempfile::tempdir().unwrap();
    let result = AppStateBuilder::new()
        .stores(paths_in(dir.path()).into_stores())
        .verifier(Arc::new(FixedVerifier::default()))
        .build()
        .await;
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

// ===== Startup state =====

#[tokio::test]
async fn build_loads_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("domains.json"),
        r#"[{"name":"live.example","nameservers_correct":true,"last_checked":"2024-01-01T00:00:00Z"}]"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("limbo_domains.txt"), "waiting.example\n").unwrap();
    std::fs::write(dir.path().join("removed_domains.txt"), "gone.example\n").unwrap();

    let state = AppStateBuilder::new()
        .stores(paths_in(dir.path()).into_stores())
        .verifier(Arc::new(FixedVerifier::default()))
        .provisioner(Arc::new(CountingProvisioner::default()))
        .build()
        .await
        .unwrap();

    let snapshot = state.status_service.snapshot().await;
    assert_eq!(snapshot.active.len(), 1);
    assert_eq!(snapshot.active[0].name, "live.example");
    assert_eq!(snapshot.pending, vec!["waiting.example"]);
    assert_eq!(snapshot.removed_count, 1);
}

#[tokio::test]
async fn build_with_no_files_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppStateBuilder::new()
        .stores(paths_in(dir.path()).into_stores())
        .verifier(Arc::new(FixedVerifier::default()))
        .provisioner(Arc::new(CountingProvisioner::default()))
        .build()
        .await
        .unwrap();

    let snapshot = state.status_service.snapshot().await;
    assert!(snapshot.active.is_empty());
    assert!(snapshot.pending.is_empty());
    assert_eq!(snapshot.removed_count, 0);
}

// ===== End to end through the files =====

#[tokio::test]
async fn submitted_domain_graduates_and_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let provisioner = Arc::new(CountingProvisioner::default());
    let state = AppStateBuilder::new()
        .stores(paths_in(dir.path()).into_stores())
        .verifier(Arc::new(FixedVerifier::default().with("new.example", true)))
        .provisioner(provisioner.clone())
        .build()
        .await
        .unwrap();

    state.submission_service.submit("  new.example ").await.unwrap();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("limbo_domains.txt")).unwrap(),
        "new.example\n"
    );

    let report = state.reconciler.run_pending_pass().await;
    assert_eq!(report.graduated, 1);
    assert_eq!(provisioner.calls.load(Ordering::SeqCst), 1);

    assert_eq!(
        std::fs::read_to_string(dir.path().join("limbo_domains.txt")).unwrap(),
        ""
    );
    let active: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("domains.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(active[0]["name"], "new.example");
    assert_eq!(active[0]["nameservers_correct"], true);
}

#[tokio::test]
async fn lost_delegation_is_recorded_in_removed_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("domains.json"),
        r#"[{"name":"moved.example","nameservers_correct":true,"last_checked":"2024-01-01T00:00:00Z"}]"#,
    )
    .unwrap();

    let state = AppStateBuilder::new()
        .stores(paths_in(dir.path()).into_stores())
        .verifier(Arc::new(FixedVerifier::default()))
        .provisioner(Arc::new(CountingProvisioner::default()))
        .build()
        .await
        .unwrap();

    let report = state.reconciler.run_active_pass().await;
    assert_eq!(report.evicted, 1);
    assert!(state.status_service.export_active().await.is_empty());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("removed_domains.txt")).unwrap(),
        "moved.example\n"
    );
}

#[tokio::test]
async fn nameserver_lookup_builds_exact_order_verifier() {
    let dir = tempfile::tempdir().unwrap();
    let expected = vec![
        "ian.ns.cloudflare.com.".to_string(),
        "vera.ns.cloudflare.com.".to_string(),
    ];
    let mut answers = HashMap::new();
    answers.insert("good.example".to_string(), expected.clone());
    answers.insert(
        "reversed.example".to_string(),
        expected.iter().rev().cloned().collect(),
    );

    let state = AppStateBuilder::new()
        .stores(paths_in(dir.path()).into_stores())
        .nameserver_lookup(Arc::new(StaticLookup(answers)), expected)
        .provisioner(Arc::new(CountingProvisioner::default()))
        .build()
        .await
        .unwrap();

    state.submission_service.submit("good.example").await.unwrap();
    state.submission_service.submit("reversed.example").await.unwrap();
    let report = state.reconciler.run_pending_pass().await;

    assert_eq!(report.checked, 2);
    assert_eq!(report.graduated, 1);
    let snapshot = state.status_service.snapshot().await;
    assert_eq!(snapshot.active[0].name, "good.example");
    assert_eq!(snapshot.pending, vec!["reversed.example"]);
}

// ===== Submissions across restarts =====

async fn idle_state(dir: &Path) -> AppState {
    AppStateBuilder::new()
        .stores(paths_in(dir).into_stores())
        .verifier(Arc::new(FixedVerifier::default()))
        .provisioner(Arc::new(CountingProvisioner::default()))
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn submitted_names_survive_restart_unchanged() {
    let dir = tempfile::tempdir().unwrap();

    let state = idle_state(dir.path()).await;
    let submissions = &state.submission_service;
    submissions.submit("first.example").await.unwrap();
    let rejected = submissions.submit("evil.example\nother.example").await;
    assert!(matches!(rejected, Err(CoreError::ValidationError(_))));
    submissions.submit(" second.example ").await.unwrap();
    let before = state.registry.snapshot_pending().await;
    drop(state);

    let restarted = idle_state(dir.path()).await;
    assert_eq!(restarted.registry.snapshot_pending().await, before);
    assert_eq!(before, vec!["first.example", "second.example"]);
}
