use crate::config::AppConfig;
use crate::media::{MediaStore, create_media_store};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::warn;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub media: Arc<dyn MediaStore>,
}

/// 确保题图上传目录可用
fn ensure_upload_dir() {
    let config = AppConfig::get();
    let dir = &config.upload.dir;
    if !std::path::Path::new(dir).exists()
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        warn!("Failed to create upload directory {}: {}", dir, e);
    }
}

/// 准备服务器启动的上下文
/// 包括存储与媒体委托的初始化
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    ensure_upload_dir();
    let media = create_media_store();
    warn!("Media store initialized");

    StartupContext { storage, media }
}
