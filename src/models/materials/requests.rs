use serde::Deserialize;
use ts_rs::TS;

/// 创建课程资料请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct CreateMaterialRequest {
    pub title: String,
    pub object_path: String,
}

// 用于存储层的内部参数
#[derive(Debug, Clone)]
pub struct NewLessonMaterial {
    pub course_id: String,
    pub title: String,
    pub object_path: String,
    pub uploaded_by: String,
}
