use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 提交状态
///
/// 只会向前推进：创建时为 pending，导师批改后变为 graded。
/// 其余取值原样保留，由视图作为通用徽标展示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Pending,
    Graded,
    Other(String),
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const GRADED: &'static str = "graded";

    pub fn parse(s: &str) -> Self {
        match s {
            Self::PENDING => SubmissionStatus::Pending,
            Self::GRADED => SubmissionStatus::Graded,
            other => SubmissionStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SubmissionStatus::Pending => Self::PENDING,
            SubmissionStatus::Graded => Self::GRADED,
            SubmissionStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub submission_text: Option<String>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub status: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Submission {
    pub fn status(&self) -> SubmissionStatus {
        SubmissionStatus::parse(&self.status)
    }
}

/// 待插入的新提交，状态固定为 pending
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub assignment_id: String,
    pub student_id: String,
    pub submission_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(SubmissionStatus::parse("pending"), SubmissionStatus::Pending);
        assert_eq!(SubmissionStatus::parse("graded"), SubmissionStatus::Graded);
        assert_eq!(
            SubmissionStatus::parse("returned"),
            SubmissionStatus::Other("returned".into())
        );
        assert_eq!(SubmissionStatus::parse("returned").as_str(), "returned");
    }
}
