//! 作业行的展示状态

use serde::Serialize;
use ts_rs::TS;

use crate::models::submissions::entities::{Submission, SubmissionStatus};

pub const AWAITING_REVIEW: &str = "Awaiting review";

/// 行上可执行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/viewer.ts")]
pub enum RowAction {
    Submit,
    ViewFeedback,
}

/// 四种互斥的展示状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/viewer.ts")]
pub enum AssignmentDisplayState {
    NotSubmitted,
    Pending,
    Graded,
    // 未识别的状态原样展示
    Other(String),
}

impl AssignmentDisplayState {
    pub fn from_submission(submission: Option<&Submission>) -> Self {
        match submission.map(Submission::status) {
            None => AssignmentDisplayState::NotSubmitted,
            Some(SubmissionStatus::Pending) => AssignmentDisplayState::Pending,
            Some(SubmissionStatus::Graded) => AssignmentDisplayState::Graded,
            Some(SubmissionStatus::Other(status)) => AssignmentDisplayState::Other(status),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AssignmentDisplayState::NotSubmitted => "Not submitted",
            AssignmentDisplayState::Pending => "Pending",
            AssignmentDisplayState::Graded => "Graded",
            AssignmentDisplayState::Other(status) => status,
        }
    }

    pub fn actions(&self) -> Vec<RowAction> {
        match self {
            AssignmentDisplayState::NotSubmitted => vec![RowAction::Submit],
            AssignmentDisplayState::Graded => vec![RowAction::ViewFeedback],
            AssignmentDisplayState::Pending | AssignmentDisplayState::Other(_) => Vec::new(),
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            AssignmentDisplayState::Pending => Some(AWAITING_REVIEW),
            _ => None,
        }
    }
}

/// 分数展示，例如 `85 pts`
pub fn format_score(score: f64) -> String {
    format!("{score} pts")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::index::tests::submission;

    #[test]
    fn test_not_submitted_offers_submit_only() {
        let state = AssignmentDisplayState::from_submission(None);
        assert_eq!(state, AssignmentDisplayState::NotSubmitted);
        assert_eq!(state.label(), "Not submitted");
        assert_eq!(state.actions(), vec![RowAction::Submit]);
        assert_eq!(state.message(), None);
    }

    #[test]
    fn test_pending_has_no_action() {
        let sub = submission("x1", "a1", "pending");
        let state = AssignmentDisplayState::from_submission(Some(&sub));
        assert_eq!(state.label(), "Pending");
        assert!(state.actions().is_empty());
        assert_eq!(state.message(), Some(AWAITING_REVIEW));
    }

    #[test]
    fn test_graded_offers_feedback_only() {
        let sub = submission("x1", "a1", "graded");
        let state = AssignmentDisplayState::from_submission(Some(&sub));
        assert_eq!(state.actions(), vec![RowAction::ViewFeedback]);
    }

    #[test]
    fn test_unknown_status_rendered_verbatim() {
        let sub = submission("x1", "a1", "needs_revision");
        let state = AssignmentDisplayState::from_submission(Some(&sub));
        assert_eq!(state.label(), "needs_revision");
        assert!(state.actions().is_empty());
        assert_eq!(state.message(), None);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(85.0), "85 pts");
        assert_eq!(format_score(92.5), "92.5 pts");
    }
}
