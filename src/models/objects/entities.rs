use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 存储桶
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/storage.ts")]
pub struct StorageBucket {
    pub id: String,
    pub public: bool,
}

/// 存储桶中的对象元数据
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/storage.ts")]
pub struct StorageObject {
    pub bucket_id: String,
    pub name: String,
    pub owner_id: Option<String>,
    pub size: i64,
    pub content_type: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStorageObject {
    pub bucket_id: String,
    pub name: String,
    pub owner_id: Option<String>,
    pub size: i64,
    pub content_type: String,
}
