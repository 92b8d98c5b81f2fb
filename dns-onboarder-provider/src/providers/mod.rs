//! Provider implementations

pub(crate) mod common;

#[cfg(feature = "cloudflare")]
mod cloudflare;

#[cfg(feature = "cloudflare")]
pub use cloudflare::CloudflareProvider;
