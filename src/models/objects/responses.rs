use serde::Serialize;
use ts_rs::TS;

/// 文件上传响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/storage.ts")]
pub struct ObjectUploadResponse {
    pub bucket_id: String,
    pub name: String,
    pub size: i64,
    pub content_type: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
