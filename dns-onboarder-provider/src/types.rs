use serde::{Deserialize, Serialize};

// ============ Provider Types ============

/// Identifies which DNS provider implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Cloudflare DNS. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    Cloudflare,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare => write!(f, "cloudflare"),
        }
    }
}

// ============ Zone Types ============

/// Status of a zone within a DNS provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    /// Zone is active and resolving.
    Active,
    /// Zone exists but the registrar delegation has not been confirmed yet.
    Pending,
    /// Zone has been moved away or paused.
    Paused,
    /// Status could not be determined.
    Unknown,
}

/// A hosting zone managed by a DNS provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderZone {
    /// Provider-specific zone identifier.
    pub id: String,
    /// Zone apex (e.g., `"example.com"`).
    pub name: String,
    /// Which provider manages this zone.
    pub provider: ProviderType,
    /// Current zone status.
    pub status: ZoneStatus,
    /// Nameservers the provider assigned to the zone, if reported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name_servers: Vec<String>,
}

/// Request to create a new hosting zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateZoneRequest {
    /// Zone apex to create.
    pub name: String,
    /// Account that should own the zone. `None` lets the provider pick the
    /// token's default account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Ask the provider to scan and import existing records.
    pub jump_start: bool,
}

impl CreateZoneRequest {
    /// Zone request with no account override and no record scan.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_id: None,
            jump_start: false,
        }
    }

    /// Set the owning account (empty strings are treated as unset).
    #[must_use]
    pub fn with_account(mut self, account_id: Option<String>) -> Self {
        self.account_id = account_id.filter(|id| !id.is_empty());
        self
    }
}

// ============ DNS Record Types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
}

impl DnsRecordType {
    /// Uppercase wire name of the record type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DnsRecordType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "NS" => Ok(Self::Ns),
            "SRV" => Ok(Self::Srv),
            "CAA" => Ok(Self::Caa),
            _ => Err(format!("unsupported record type: {s}")),
        }
    }
}

/// A DNS record as returned by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Provider-specific record identifier.
    pub id: String,
    /// Zone identifier this record belongs to.
    pub zone_id: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Fully qualified record name as stored by the provider.
    pub name: String,
    /// Record content (address, target, text, ...).
    pub content: String,
    /// Time to live in seconds (`1` means automatic on Cloudflare).
    pub ttl: u32,
    /// Whether Cloudflare CDN proxy is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

/// Request to create a new DNS record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDnsRecordRequest {
    /// Zone identifier to create the record in.
    pub zone_id: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Record name, relative (`"www"`, `"@"`) or fully qualified.
    pub name: String,
    /// Record content.
    pub content: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Enable Cloudflare CDN proxy.
    pub proxied: Option<bool>,
}

// ============ Credentials ============

/// Type-safe credential container for all supported DNS providers.
///
/// Serialized as a tagged enum with `"provider"` as the tag and `"credentials"` as the content:
///
/// ```json
/// { "provider": "cloudflare", "credentials": { "api_token": "..." } }
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Cloudflare credentials. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    #[serde(rename = "cloudflare")]
    Cloudflare {
        /// Cloudflare API token.
        api_token: String,
    },
}

// 不输出凭证内容，避免 token 进入日志
impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare { .. } => f
                .debug_struct("Cloudflare")
                .field("api_token", &"<redacted>")
                .finish(),
        }
    }
}
