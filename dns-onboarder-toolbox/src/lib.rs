//! Delegation lookups for the DNS onboarder
//!
//! 提供针对指定递归解析器的 NS 查询，用于判断域名是否已委派到期望的名称服务器。
//! 所有功能无状态，独立于接入业务逻辑。

mod error;
mod services;
mod types;

pub use error::{ToolboxError, ToolboxResult};
pub use services::{NameserverLookup, ResolverNameserverLookup, ToolboxService};
pub use types::NameserverLookupResult;
