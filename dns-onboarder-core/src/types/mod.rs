//! 类型定义模块

mod domain;
mod record;
mod report;

pub use domain::DomainRecord;
pub use record::{RecordRowError, RecordTemplate};
pub use report::{ActivePassReport, PendingPassReport, StatusSnapshot};

// Re-export provider 库的公共类型
pub use dns_onboarder_provider::{DnsRecordType, ProviderZone};
