use crate::access::Bucket;
use crate::config::{AppConfig, DEFAULT_JWT_SECRET};
use crate::storage::Storage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 为每个已知存储桶准备本地目录
async fn prepare_bucket_dirs(root: &Path) {
    for bucket in [Bucket::LessonMaterials, Bucket::Assignments] {
        let dir = root.join(bucket.id());
        match tokio::fs::create_dir_all(&dir).await {
            Ok(()) => debug!("Bucket directory ready: {}", dir.display()),
            Err(e) => error!("Failed to create bucket directory {}: {}", dir.display(), e),
        }
    }
}

/// 检查存储桶元数据是否已由迁移写入
async fn verify_buckets(storage: &Arc<dyn Storage>) {
    for bucket in [Bucket::LessonMaterials, Bucket::Assignments] {
        match storage.get_bucket(bucket.id()).await {
            Ok(Some(meta)) if meta.public != bucket.is_public() => {
                warn!(
                    "Bucket '{}' public flag is {}, expected {}",
                    meta.id,
                    meta.public,
                    bucket.is_public()
                );
            }
            Ok(Some(_)) => {}
            Ok(None) => warn!("Bucket '{}' is missing from storage_buckets", bucket.id()),
            Err(e) => warn!("Failed to read bucket '{}': {}", bucket.id(), e),
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储与对象目录
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();

    if config.jwt.secret == DEFAULT_JWT_SECRET {
        if config.is_production() {
            error!("JWT_SECRET is not set, refusing to use the development secret in production");
            std::process::exit(1);
        }
        warn!("Using the built-in development JWT secret; set JWT_SECRET before deploying");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    verify_buckets(&storage).await;
    prepare_bucket_dirs(Path::new(&config.upload.dir)).await;

    StartupContext { storage }
}
