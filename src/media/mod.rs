//! 媒体委托层
//!
//! 题图 blob 的存取抽象。上传先于持久化：路由先把 blob 写进媒体存储
//! 拿到 {url, key}，再随题目创建/更新写入数据库行。两步之间失败产生的
//! 孤儿 blob 由补偿删除接口清理。

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::{AssessmentError, Result};
use crate::models::questions::responses::MediaUploadResponse;

/// 媒体存储接口
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// 写入 blob，返回对外 URL 与存储 key
    async fn upload(&self, data: &[u8], extension: &str) -> Result<MediaUploadResponse>;
    /// 按 key 删除 blob；key 不存在视为成功
    async fn delete(&self, key: &str) -> Result<()>;
}

/// 本地文件系统实现
pub struct FsMediaStore {
    dir: String,
    public_base_url: String,
}

impl FsMediaStore {
    pub fn new(dir: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// key 只允许存储层自己生成的形态，拒绝路径穿越
    fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() || key.starts_with('/') || key.contains("..") {
            return Err(AssessmentError::validation(format!("非法的媒体 key: {key}")));
        }
        Ok(())
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn upload(&self, data: &[u8], extension: &str) -> Result<MediaUploadResponse> {
        if !Path::new(&self.dir).exists() {
            std::fs::create_dir_all(&self.dir)
                .map_err(|e| AssessmentError::file_operation(format!("创建上传目录失败: {e}")))?;
        }

        let key = format!(
            "{}-{}{}",
            chrono::Utc::now().timestamp(),
            Uuid::new_v4(),
            extension
        );
        let file_path = format!("{}/{}", self.dir, key);

        std::fs::write(&file_path, data)
            .map_err(|e| AssessmentError::file_operation(format!("写入文件失败: {e}")))?;

        Ok(MediaUploadResponse {
            url: format!("{}/{}", self.public_base_url.trim_end_matches('/'), key),
            key,
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        Self::validate_key(key)?;

        let file_path = format!("{}/{}", self.dir, key);
        match std::fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AssessmentError::file_operation(format!(
                "删除文件失败: {e}"
            ))),
        }
    }
}

/// 按配置创建媒体存储实例
pub fn create_media_store() -> Arc<dyn MediaStore> {
    let config = AppConfig::get();
    Arc::new(FsMediaStore::new(
        config.upload.dir.clone(),
        config.upload.public_base_url.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_and_delete_round_trip() {
        let dir = std::env::temp_dir().join(format!("media-test-{}", Uuid::new_v4()));
        let store = FsMediaStore::new(dir.to_string_lossy(), "http://localhost/uploads");

        let uploaded = store.upload(b"\x89PNG\r\n\x1a\n", ".png").await.unwrap();
        assert!(uploaded.key.ends_with(".png"));
        assert!(uploaded.url.ends_with(&uploaded.key));
        assert!(dir.join(&uploaded.key).exists());

        store.delete(&uploaded.key).await.unwrap();
        assert!(!dir.join(&uploaded.key).exists());

        // 重复删除是 no-op
        store.delete(&uploaded.key).await.unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_delete_rejects_traversal() {
        let store = FsMediaStore::new("/tmp/none", "http://localhost");
        assert!(store.delete("../etc/passwd").await.is_err());
        assert!(store.delete("/abs/path").await.is_err());
        assert!(store.delete("").await.is_err());
    }
}
