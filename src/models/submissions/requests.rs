use serde::Deserialize;
use ts_rs::TS;

/// 提交作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub assignment_id: String,
    pub submission_text: String,
}

/// 批改请求（导师/管理员）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub score: f64,
    pub feedback: Option<String>,
}
