//! 按行存储的域名列表（待处理队列、移除历史）

use std::path::PathBuf;

use async_trait::async_trait;
use dns_onboarder_core::{CoreResult, NameListStore};

use super::file_io::{read_optional, write_atomic};

/// 每行一个域名的纯文本文件
///
/// 读取时忽略空行并去掉首尾空白；写入时每个名字后跟一个换行。
pub struct LineNameListStore {
    path: PathBuf,
}

impl LineNameListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl NameListStore for LineNameListStore {
    async fn load(&self) -> CoreResult<Vec<String>> {
        let content = read_optional(&self.path).await?.unwrap_or_default();
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    async fn save(&self, names: &[String]) -> CoreResult<()> {
        let content: String = names.iter().map(|name| format!("{name}\n")).collect();
        write_atomic(&self.path, &content).await
    }
}
