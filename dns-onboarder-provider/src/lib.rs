//! # dns-onboarder-provider
//!
//! DNS provider abstraction used by the onboarding service to create hosting
//! zones and seed them with a fixed record set.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | Bearer Token |
//!
//! ## Feature Flags
//!
//! - **`cloudflare`** *(default)* — Enable the Cloudflare provider.
//! - **`rustls`** *(default)* — Use rustls as the TLS backend.
//! - **`native-tls`** — Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_onboarder_provider::{
//!     create_provider, CreateDnsRecordRequest, CreateZoneRequest, DnsRecordType,
//!     ProviderCredentials,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::Cloudflare {
//!         api_token: "your-token".to_string(),
//!     })?;
//!
//!     let zone = provider
//!         .create_zone(&CreateZoneRequest::new("example.com"))
//!         .await?;
//!
//!     provider
//!         .create_record(&CreateDnsRecordRequest {
//!             zone_id: zone.id.clone(),
//!             record_type: DnsRecordType::A,
//!             name: "www".to_string(),
//!             content: "192.0.2.1".to_string(),
//!             ttl: 1,
//!             proxied: Some(true),
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! Transient failures (`NetworkError`, `Timeout`, `RateLimited`) are reported
//! as-is; callers decide when to try again.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::create_provider;

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsProvider;

// Re-export types
pub use types::{
    CreateDnsRecordRequest, CreateZoneRequest, DnsRecord, DnsRecordType, ProviderCredentials,
    ProviderType, ProviderZone, ZoneStatus,
};

// Re-export log helpers
pub use utils::log_sanitizer::mask_secret;

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;
