use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct LessonMaterial {
    pub id: String,
    pub course_id: String,
    pub title: String,
    // lesson-materials 桶中的对象路径
    pub object_path: String,
    pub uploaded_by: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
