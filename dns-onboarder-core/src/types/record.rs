//! Record template types

use thiserror::Error;

use dns_onboarder_provider::DnsRecordType;

/// One validated row of the record table, applied to every new zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTemplate {
    pub record_type: DnsRecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

/// Why a single row of the record table was rejected.
///
/// `row` is the 1-based line of the row in the table, header included.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordRowError {
    #[error("row {row}: expected 5 fields, got {found}")]
    FieldCount { row: usize, found: usize },

    #[error("row {row}: invalid TTL '{value}'")]
    InvalidTtl { row: usize, value: String },

    #[error("row {row}: invalid proxied value '{value}'")]
    InvalidProxied { row: usize, value: String },

    #[error("row {row}: unsupported record type '{value}'")]
    UnsupportedType { row: usize, value: String },
}

impl RecordRowError {
    pub fn row(&self) -> usize {
        match self {
            Self::FieldCount { row, .. }
            | Self::InvalidTtl { row, .. }
            | Self::InvalidProxied { row, .. }
            | Self::UnsupportedType { row, .. } => *row,
        }
    }
}
