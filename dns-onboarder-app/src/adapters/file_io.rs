//! 文件读写辅助

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dns_onboarder_core::{CoreError, CoreResult};
use tokio::fs;

/// 读取整个文件；文件不存在时返回 `None`
pub(crate) async fn read_optional(path: &Path) -> CoreResult<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(storage_error(path, &e)),
    }
}

/// 写入临时文件后重命名，读者不会看到写了一半的内容
pub(crate) async fn write_atomic(path: &Path, content: &str) -> CoreResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| storage_error(dir, &e))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, content)
        .await
        .map_err(|e| storage_error(&tmp, &e))?;

    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(storage_error(path, &e));
    }
    log::debug!("Saved {} ({} bytes)", path.display(), content.len());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

pub(crate) fn storage_error(path: &Path, e: &std::io::Error) -> CoreError {
    CoreError::StorageError(format!("{}: {e}", path.display()))
}
