//! 提交对话框与反馈对话框

use serde::Serialize;
use ts_rs::TS;

use super::display::format_score;
use crate::errors::{AppError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::{NewSubmission, Submission, SubmissionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    #[default]
    Closed,
    Open,
    Submitting,
}

/// 提交对话框：closed → open → submitting → closed
#[derive(Debug, Clone, Default)]
pub struct SubmissionDialog {
    phase: DialogPhase,
    assignment: Option<Assignment>,
    text: String,
}

impl SubmissionDialog {
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 打开对话框；切换到另一份作业时清空输入
    pub fn open(&mut self, assignment: Assignment) -> Result<()> {
        if self.phase == DialogPhase::Submitting {
            return Err(AppError::conflict("A submission is already in progress"));
        }
        if self.assignment.as_ref().map(|a| &a.id) != Some(&assignment.id) {
            self.text.clear();
        }
        self.assignment = Some(assignment);
        self.phase = DialogPhase::Open;
        Ok(())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.phase == DialogPhase::Open {
            self.text = text.into();
        }
    }

    /// 关闭对话框，输入保留以便再次打开同一作业时继续编辑
    pub fn close(&mut self) {
        if self.phase == DialogPhase::Open {
            self.phase = DialogPhase::Closed;
        }
    }

    /// 校验并进入 submitting，返回待写入的提交
    pub fn begin_submit(&mut self, student_id: Option<&str>) -> Result<NewSubmission> {
        if self.phase == DialogPhase::Submitting {
            return Err(AppError::conflict("A submission is already in progress"));
        }
        let student_id = student_id
            .ok_or_else(|| AppError::validation("You must be signed in to submit"))?;
        let assignment = match (&self.phase, &self.assignment) {
            (DialogPhase::Open, Some(assignment)) => assignment,
            _ => return Err(AppError::validation("No assignment selected")),
        };
        let text = self.text.trim();
        if text.is_empty() {
            return Err(AppError::validation("Submission text cannot be empty"));
        }

        let new = NewSubmission {
            assignment_id: assignment.id.clone(),
            student_id: student_id.to_string(),
            submission_text: text.to_string(),
        };
        self.phase = DialogPhase::Submitting;
        Ok(new)
    }

    /// 写入成功：关闭并清空
    pub fn finish_success(&mut self) {
        self.phase = DialogPhase::Closed;
        self.assignment = None;
        self.text.clear();
    }

    /// 写入失败：回到 open，输入保留
    pub fn finish_failure(&mut self) {
        if self.phase == DialogPhase::Submitting {
            self.phase = DialogPhase::Open;
        }
    }
}

/// 反馈对话框的只读内容
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/viewer.ts")]
pub struct FeedbackView {
    pub assignment_id: String,
    pub assignment_title: String,
    pub score: Option<f64>,
    pub score_label: Option<String>,
    pub max_score: Option<f64>,
    pub feedback: Option<String>,
    pub submission_text: Option<String>,
}

impl FeedbackView {
    /// 仅已批改的提交可以查看反馈
    pub fn build(assignment: &Assignment, submission: &Submission) -> Result<Self> {
        if submission.status() != SubmissionStatus::Graded {
            return Err(AppError::validation("Submission has not been graded yet"));
        }
        Ok(Self {
            assignment_id: assignment.id.clone(),
            assignment_title: assignment.title.clone(),
            score: submission.score,
            score_label: submission.score.map(format_score),
            max_score: assignment.max_score,
            feedback: submission.feedback.clone(),
            submission_text: submission.submission_text.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackDialog {
    view: Option<FeedbackView>,
}

impl FeedbackDialog {
    pub fn open(&mut self, assignment: &Assignment, submission: &Submission) -> Result<&FeedbackView> {
        let view = FeedbackView::build(assignment, submission)?;
        Ok(self.view.insert(view))
    }

    pub fn view(&self) -> Option<&FeedbackView> {
        self.view.as_ref()
    }

    pub fn close(&mut self) {
        self.view = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::index::tests::{assignment, submission};

    #[test]
    fn test_validation_rejects_before_write() {
        let mut dialog = SubmissionDialog::default();

        // 没有选中作业
        let err = dialog.begin_submit(Some("s1")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        dialog.open(assignment("a1", "c1", 1)).unwrap();
        for text in ["", "   ", "\n\t "] {
            dialog.set_text(text);
            let err = dialog.begin_submit(Some("s1")).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            assert_eq!(dialog.phase(), DialogPhase::Open);
        }

        dialog.set_text("answer");
        let err = dialog.begin_submit(None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(dialog.phase(), DialogPhase::Open);
    }

    #[test]
    fn test_submit_trims_and_guards_in_flight() {
        let mut dialog = SubmissionDialog::default();
        dialog.open(assignment("a1", "c1", 1)).unwrap();
        dialog.set_text("  My answer \n");

        let new = dialog.begin_submit(Some("s1")).unwrap();
        assert_eq!(new.submission_text, "My answer");
        assert_eq!(new.assignment_id, "a1");
        assert_eq!(dialog.phase(), DialogPhase::Submitting);

        let err = dialog.begin_submit(Some("s1")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        dialog.finish_failure();
        assert_eq!(dialog.phase(), DialogPhase::Open);
        assert_eq!(dialog.text(), "  My answer \n");

        dialog.begin_submit(Some("s1")).unwrap();
        dialog.finish_success();
        assert_eq!(dialog.phase(), DialogPhase::Closed);
        assert!(dialog.text().is_empty());
        assert!(dialog.assignment().is_none());
    }

    #[test]
    fn test_feedback_only_for_graded() {
        let a = assignment("a1", "c1", 1);
        let mut dialog = FeedbackDialog::default();

        let pending = submission("x1", "a1", "pending");
        assert!(dialog.open(&a, &pending).is_err());
        assert!(dialog.view().is_none());

        let mut graded = submission("x1", "a1", "graded");
        graded.score = Some(85.0);
        graded.feedback = Some("Good work".into());
        let view = dialog.open(&a, &graded).unwrap();
        assert_eq!(view.score_label.as_deref(), Some("85 pts"));
        assert_eq!(view.feedback.as_deref(), Some("Good work"));
        assert_eq!(view.submission_text.as_deref(), Some("text x1"));

        dialog.close();
        assert!(dialog.view().is_none());
    }
}
