//! 对象内容的本地磁盘存放
//!
//! 布局：`{upload.dir}/{bucket}/{object path}`，元数据保存在 storage_objects 表中。

use std::path::{Path, PathBuf};

use crate::access::{Bucket, ObjectPath};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use tracing::warn;

pub fn object_file_path(root: &Path, bucket: Bucket, path: &ObjectPath) -> PathBuf {
    let mut file = root.join(bucket.id());
    for segment in path.as_key().split('/') {
        file.push(segment);
    }
    file
}

fn upload_root() -> PathBuf {
    PathBuf::from(&AppConfig::get().upload.dir)
}

/// 已写入临时文件、尚未生效的对象内容
///
/// 元数据写入成功后再 `commit`，失败则 `discard`，保证磁盘内容与元数据一致。
pub struct StagedObject {
    tmp: PathBuf,
    dest: PathBuf,
}

impl StagedObject {
    /// 重命名为正式文件，覆盖旧内容
    pub async fn commit(self) -> Result<()> {
        if let Err(e) = tokio::fs::rename(&self.tmp, &self.dest).await {
            let _ = tokio::fs::remove_file(&self.tmp).await;
            return Err(AppError::file_operation(format!("写入对象失败: {e}")));
        }
        Ok(())
    }

    pub async fn discard(self) {
        if let Err(e) = tokio::fs::remove_file(&self.tmp).await {
            warn!("清理临时文件 {} 失败: {}", self.tmp.display(), e);
        }
    }
}

pub async fn stage_object(bucket: Bucket, path: &ObjectPath, data: &[u8]) -> Result<StagedObject> {
    let dest = object_file_path(&upload_root(), bucket, path);
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_operation(format!("创建目录失败: {e}")))?;
    }

    let tmp = dest.with_extension(format!("{}.part", uuid::Uuid::new_v4()));
    if let Err(e) = tokio::fs::write(&tmp, data).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(AppError::file_operation(format!("写入对象失败: {e}")));
    }
    Ok(StagedObject { tmp, dest })
}

pub async fn read_object(bucket: Bucket, path: &ObjectPath) -> Result<Vec<u8>> {
    let file = object_file_path(&upload_root(), bucket, path);
    tokio::fs::read(&file).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::not_found("Object content not found"),
        _ => AppError::file_operation(format!("读取对象失败: {e}")),
    })
}

/// 文件已不存在视为成功
pub async fn remove_object(bucket: Bucket, path: &ObjectPath) -> Result<()> {
    let file = object_file_path(&upload_root(), bucket, path);
    match tokio::fs::remove_file(&file).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::file_operation(format!("删除对象失败: {e}"))),
    }
}
