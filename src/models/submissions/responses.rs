use serde::Serialize;
use ts_rs::TS;

use super::entities::Submission;

/// 提交响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionResponse {
    pub id: String,
    pub assignment_id: String,
    pub status: String,
    pub submission_text: Option<String>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub submitted_at: String,
    pub graded_at: Option<String>,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id,
            assignment_id: s.assignment_id,
            status: s.status,
            submission_text: s.submission_text,
            score: s.score,
            feedback: s.feedback,
            submitted_at: s.submitted_at.to_rfc3339(),
            graded_at: s.graded_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// 视图提交响应：新提交 + 重新加载后的课程分组
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct ViewerSubmitResponse {
    pub submission: SubmissionResponse,
    pub course: Option<crate::viewer::CourseSection>,
}
