//! DNS onboarder service entry point
//!
//! Loads configuration, restores the registry from disk, starts both
//! reconciliation loops and serves the status and submission pages.

mod config;
mod handlers;
mod logging;
mod pages;

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use dns_onboarder_app::AppStateBuilder;
use dns_onboarder_app::adapters::FileRecordTemplateSource;
use dns_onboarder_provider::{DnsProvider, ProviderCredentials, create_provider, mask_secret};
use dns_onboarder_toolbox::ResolverNameserverLookup;

use crate::config::{API_TOKEN_ENV, Config};
use crate::handlers::WebContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_from_env()?;
    let _log_guard = logging::init(&config.log)?;

    tracing::info!(
        "Starting DNS onboarder {} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server.listen
    );

    let provider = build_provider(&config).await?;

    let lookup = ResolverNameserverLookup::parse(&config.delegation.resolver)
        .context("Invalid delegation resolver")?;
    tracing::info!(
        "Delegation checked via {} against {:?}",
        lookup.nameserver(),
        config.delegation.expected_nameservers
    );

    let app = AppStateBuilder::new()
        .stores(config.storage.storage_paths().into_stores())
        .nameserver_lookup(
            Arc::new(lookup),
            config.delegation.expected_nameservers.clone(),
        )
        .provider(
            provider,
            Arc::new(FileRecordTemplateSource::new(
                config.storage.record_table_path.clone(),
            )),
            config.cloudflare.account_id.clone(),
        )
        .intervals(config.reconcile.intervals())
        .build()
        .await?;
    let app = Arc::new(app);

    let tasks = app.spawn_reconcile_loops();

    let ctx = web::Data::new(WebContext {
        app: Arc::clone(&app),
        expected_nameservers: config.delegation.expected_nameservers.clone(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(ctx.clone())
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind(&config.server.listen)
    .with_context(|| format!("Failed to bind {}", config.server.listen))?
    .run();

    let result = server.await.context("HTTP server error");
    tasks.abort();
    tracing::info!("DNS onboarder stopped");
    result
}

/// Build the Cloudflare client and check the token once.
///
/// A missing or rejected token does not stop the service; provisioning fails
/// until it is fixed.
async fn build_provider(config: &Config) -> anyhow::Result<Arc<dyn DnsProvider>> {
    let api_token = config.api_token();

    match &api_token {
        None => tracing::warn!("{API_TOKEN_ENV} is not set, zone provisioning will fail"),
        Some(token) => tracing::info!("Using Cloudflare token {}", mask_secret(token)),
    }

    let has_token = api_token.is_some();
    let provider = create_provider(ProviderCredentials::Cloudflare {
        api_token: api_token.unwrap_or_default(),
    })?;

    if has_token {
        match provider.validate_credentials().await {
            Ok(true) => tracing::info!("Cloudflare token verified"),
            Ok(false) => tracing::warn!("Cloudflare token was rejected"),
            Err(e) => tracing::warn!("Could not verify Cloudflare token: {e}"),
        }
    }

    Ok(provider)
}
