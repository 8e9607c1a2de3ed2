//! 作业视图会话
//!
//! 持有课程上下文、缓存的索引以及两个对话框。缓存在每次成功提交后整体重建。

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

use super::dialogs::{FeedbackDialog, FeedbackView, SubmissionDialog};
use super::index::{AssignmentIndex, SubmissionIndex};
use super::loader::{self, AssignmentSource, LoadOutcome, LoadTicket};
use super::tree::ViewerTree;
use crate::errors::{AppError, Result};
use crate::models::courses::entities::CourseSummary;
use crate::models::submissions::entities::Submission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/viewer.ts")]
pub enum NoticeKind {
    Success,
    Error,
}

/// 面向用户的提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/viewer.ts")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AssignmentViewer {
    courses: Vec<CourseSummary>,
    student_id: Option<String>,
    issued: u64,
    // 最近一次发出的加载
    requested: Option<LoadTicket>,
    // 当前作业索引对应的加载
    indexed_for: Option<LoadTicket>,
    assignments: AssignmentIndex,
    submissions: SubmissionIndex,
    submission_dialog: SubmissionDialog,
    feedback_dialog: FeedbackDialog,
    notices: VecDeque<Notice>,
}

impl AssignmentViewer {
    pub fn new(courses: Vec<CourseSummary>, student_id: Option<String>) -> Self {
        Self {
            courses,
            student_id,
            ..Default::default()
        }
    }

    /// 更新课程列表与身份，返回是否需要重新加载
    pub fn set_context(&mut self, courses: Vec<CourseSummary>, student_id: Option<String>) -> bool {
        let changed = courses != self.courses || student_id != self.student_id;
        if changed {
            self.courses = courses;
            self.student_id = student_id;
        }
        changed
    }

    pub fn courses(&self) -> &[CourseSummary] {
        &self.courses
    }

    pub fn student_id(&self) -> Option<&str> {
        self.student_id.as_deref()
    }

    /// 发起一次加载，之前发出的加载全部作废
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        let ticket = LoadTicket::new(self.issued, &self.courses, self.student_id.as_deref());
        self.requested = Some(ticket.clone());
        ticket
    }

    /// 应用加载结果；过期的结果被丢弃并返回 false
    pub fn finish_load(&mut self, outcome: LoadOutcome) -> bool {
        if outcome.generation() != self.issued {
            debug!(
                "丢弃过期加载结果 #{} (最新 #{})",
                outcome.generation(),
                self.issued
            );
            return false;
        }
        match outcome {
            LoadOutcome::Skipped { .. } => {
                self.assignments = AssignmentIndex::default();
                self.submissions = SubmissionIndex::default();
                self.indexed_for = None;
            }
            LoadOutcome::Fetched {
                assignments,
                submissions,
                ..
            } => {
                match assignments {
                    Some(assignments) => {
                        self.assignments = AssignmentIndex::group(assignments);
                        self.indexed_for = self.requested.clone();
                    }
                    // 作业读取失败：仅在上下文未变时沿用上一次的索引
                    None if self.index_matches_request() => {}
                    None => {
                        self.assignments = AssignmentIndex::default();
                        self.indexed_for = None;
                    }
                }
                self.submissions = SubmissionIndex::build(submissions);
            }
        }
        true
    }

    fn index_matches_request(&self) -> bool {
        match (&self.indexed_for, &self.requested) {
            (Some(indexed), Some(requested)) => indexed.same_context(requested),
            _ => false,
        }
    }

    pub async fn refresh<S: AssignmentSource + ?Sized>(&mut self, source: &S) -> bool {
        let ticket = self.begin_load();
        let outcome = loader::load(source, &ticket).await;
        self.finish_load(outcome)
    }

    pub fn tree(&self) -> ViewerTree {
        ViewerTree::build(
            &self.courses,
            self.student_id.is_some(),
            &self.assignments,
            &self.submissions,
        )
    }

    pub fn submission_for(&self, assignment_id: &str) -> Option<&Submission> {
        self.submissions.submission_for(assignment_id)
    }

    pub fn submission_dialog(&self) -> &SubmissionDialog {
        &self.submission_dialog
    }

    /// 打开提交对话框，仅限尚未提交的作业
    pub fn open_submission(&mut self, assignment_id: &str) -> Result<()> {
        let assignment = self
            .assignments
            .find(assignment_id)
            .ok_or_else(|| AppError::not_found(format!("Assignment not found: {assignment_id}")))?;
        if self.submissions.submission_for(assignment_id).is_some() {
            return Err(AppError::conflict("Assignment has already been submitted"));
        }
        self.submission_dialog.open(assignment.clone())
    }

    pub fn set_submission_text(&mut self, text: impl Into<String>) {
        self.submission_dialog.set_text(text);
    }

    pub fn close_submission(&mut self) {
        self.submission_dialog.close();
    }

    /// 提交当前对话框中的内容
    ///
    /// 校验失败与写入失败都会推送错误提示并返回错误；成功后重新加载。
    pub async fn submit<S: AssignmentSource + ?Sized>(&mut self, source: &S) -> Result<Submission> {
        let new = match self.submission_dialog.begin_submit(self.student_id.as_deref()) {
            Ok(new) => new,
            Err(e) => {
                self.notices.push_back(Notice::error(e.message()));
                return Err(e);
            }
        };

        match source.insert_submission(new).await {
            Ok(created) => {
                info!(
                    "作业 {} 已提交: {}",
                    created.assignment_id, created.id
                );
                self.submission_dialog.finish_success();
                self.notices
                    .push_back(Notice::success("Assignment submitted successfully"));
                self.refresh(source).await;
                Ok(created)
            }
            Err(e) => {
                warn!("提交作业失败: {}", e);
                self.submission_dialog.finish_failure();
                self.notices
                    .push_back(Notice::error(format!("Failed to submit assignment: {}", e.message())));
                Err(e)
            }
        }
    }

    /// 打开反馈对话框，仅限已批改的提交
    pub fn open_feedback(&mut self, assignment_id: &str) -> Result<&FeedbackView> {
        let assignment = self
            .assignments
            .find(assignment_id)
            .ok_or_else(|| AppError::not_found(format!("Assignment not found: {assignment_id}")))?;
        let submission = self
            .submissions
            .submission_for(assignment_id)
            .ok_or_else(|| AppError::not_found("No submission for this assignment"))?;
        self.feedback_dialog.open(assignment, submission)
    }

    pub fn feedback(&self) -> Option<&FeedbackView> {
        self.feedback_dialog.view()
    }

    pub fn close_feedback(&mut self) {
        self.feedback_dialog.close();
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::dialogs::DialogPhase;
    use crate::viewer::display::{AssignmentDisplayState, RowAction};
    use crate::viewer::index::tests::assignment;
    use crate::viewer::loader::tests::MockSource;
    use crate::viewer::tree::EMPTY_MESSAGE;
    use std::sync::atomic::Ordering;

    fn course(id: &str) -> CourseSummary {
        CourseSummary {
            id: id.to_string(),
            title: format!("Course {id}"),
            current_phase: 1,
        }
    }

    #[tokio::test]
    async fn test_empty_course_list_issues_no_fetch() {
        let source = MockSource::default();
        let mut viewer = AssignmentViewer::new(Vec::new(), Some("s1".into()));

        assert!(viewer.refresh(&source).await);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);

        let tree = viewer.tree();
        assert!(tree.empty);
        assert_eq!(tree.message.as_deref(), Some(EMPTY_MESSAGE));
    }

    #[tokio::test]
    async fn test_submit_then_grade_scenario() {
        let source = MockSource::with_assignments(vec![assignment("a1", "c1", 1)]);
        let mut viewer = AssignmentViewer::new(vec![course("c1")], Some("s1".into()));
        viewer.refresh(&source).await;

        let tree = viewer.tree();
        assert_eq!(tree.courses[0].badge, "0/1 submitted");
        let row = &tree.courses[0].assignments[0];
        assert_eq!(row.status, AssignmentDisplayState::NotSubmitted);
        assert_eq!(row.actions, vec![RowAction::Submit]);
        assert!(viewer.submission_for("a1").is_none());

        viewer.open_submission("a1").unwrap();
        viewer.set_submission_text("My answer");
        let created = viewer.submit(&source).await.unwrap();
        assert_eq!(created.submission_text.as_deref(), Some("My answer"));
        assert_eq!(viewer.submission_dialog().phase(), DialogPhase::Closed);

        let notices = viewer.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Success);

        let tree = viewer.tree();
        assert_eq!(tree.courses[0].badge, "1/1 submitted");
        let row = &tree.courses[0].assignments[0];
        assert_eq!(row.status, AssignmentDisplayState::Pending);
        assert!(row.actions.is_empty());
        assert!(viewer.open_feedback("a1").is_err());

        source.grade("a1", 85.0, "Good work");
        viewer.refresh(&source).await;

        let tree = viewer.tree();
        assert_eq!(tree.courses[0].assignments[0].actions, vec![RowAction::ViewFeedback]);
        let view = viewer.open_feedback("a1").unwrap();
        assert_eq!(view.score_label.as_deref(), Some("85 pts"));
        assert_eq!(view.feedback.as_deref(), Some("Good work"));
        assert_eq!(view.submission_text.as_deref(), Some("My answer"));

        viewer.close_feedback();
        assert!(viewer.feedback().is_none());
    }

    #[tokio::test]
    async fn test_close_submission_dialog() {
        let source = MockSource::with_assignments(vec![assignment("a1", "c1", 1)]);
        let mut viewer = AssignmentViewer::new(vec![course("c1")], Some("s1".into()));
        viewer.refresh(&source).await;

        viewer.open_submission("a1").unwrap();
        viewer.set_submission_text("draft");
        viewer.close_submission();
        assert_eq!(viewer.submission_dialog().phase(), DialogPhase::Closed);
        assert_eq!(source.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_whitespace_submit_never_writes() {
        let source = MockSource::with_assignments(vec![assignment("a1", "c1", 1)]);
        let mut viewer = AssignmentViewer::new(vec![course("c1")], Some("s1".into()));
        viewer.refresh(&source).await;

        viewer.open_submission("a1").unwrap();
        viewer.set_submission_text("   ");
        let err = viewer.submit(&source).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(source.inserts.load(Ordering::SeqCst), 0);
        assert_eq!(viewer.take_notices()[0].kind, NoticeKind::Error);
        assert_eq!(viewer.submission_dialog().phase(), DialogPhase::Open);
    }

    #[tokio::test]
    async fn test_failed_insert_keeps_dialog_open() {
        let source = MockSource::with_assignments(vec![assignment("a1", "c1", 1)]);
        let mut viewer = AssignmentViewer::new(vec![course("c1")], Some("s1".into()));
        viewer.refresh(&source).await;
        *source.fail_insert.lock().unwrap() = true;

        viewer.open_submission("a1").unwrap();
        viewer.set_submission_text("draft");
        assert!(viewer.submit(&source).await.is_err());

        assert_eq!(viewer.submission_dialog().phase(), DialogPhase::Open);
        assert_eq!(viewer.submission_dialog().text(), "draft");
        assert_eq!(viewer.tree().courses[0].badge, "0/1 submitted");

        // 恢复后无需重新输入即可重试
        *source.fail_insert.lock().unwrap() = false;
        viewer.submit(&source).await.unwrap();
        assert_eq!(viewer.tree().courses[0].badge, "1/1 submitted");
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let source = MockSource::with_assignments(vec![
            assignment("a1", "c1", 1),
            assignment("b1", "c2", 1),
        ]);
        let mut viewer = AssignmentViewer::new(vec![course("c1")], Some("s1".into()));

        let stale = viewer.begin_load();
        viewer.set_context(vec![course("c2")], Some("s1".into()));
        let fresh = viewer.begin_load();

        let fresh_outcome = loader::load(&source, &fresh).await;
        let stale_outcome = loader::load(&source, &stale).await;

        assert!(viewer.finish_load(fresh_outcome));
        assert!(!viewer.finish_load(stale_outcome));

        let tree = viewer.tree();
        assert_eq!(tree.courses.len(), 1);
        assert_eq!(tree.courses[0].course_id, "c2");
        assert_eq!(tree.courses[0].assignments[0].id, "b1");
    }

    #[tokio::test]
    async fn test_assignment_read_failure_keeps_previous_index() {
        let source = MockSource::with_assignments(vec![assignment("a1", "c1", 1)]);
        let mut viewer = AssignmentViewer::new(vec![course("c1")], Some("s1".into()));
        viewer.refresh(&source).await;

        *source.fail_assignments.lock().unwrap() = true;
        viewer.refresh(&source).await;

        assert_eq!(viewer.tree().courses[0].total, 1);
    }

    #[tokio::test]
    async fn test_read_failure_after_context_change_drops_old_rows() {
        let source = MockSource::with_assignments(vec![
            assignment("a1", "c1", 1),
            assignment("b1", "c2", 1),
        ]);
        let mut viewer = AssignmentViewer::new(vec![course("c1"), course("c2")], Some("s1".into()));
        viewer.refresh(&source).await;
        assert_eq!(viewer.tree().courses[1].total, 1);

        *source.fail_assignments.lock().unwrap() = true;
        viewer.set_context(vec![course("c2")], Some("s2".into()));
        viewer.refresh(&source).await;

        let tree = viewer.tree();
        assert_eq!(tree.courses.len(), 1);
        assert_eq!(tree.courses[0].total, 0);
        assert!(tree.courses[0].assignments.is_empty());

        // 再次失败时上下文一致，但没有可沿用的索引
        viewer.refresh(&source).await;
        assert_eq!(viewer.tree().courses[0].total, 0);
    }

    #[test]
    fn test_set_context_reports_changes() {
        let mut viewer = AssignmentViewer::new(vec![course("c1")], Some("s1".into()));
        assert!(!viewer.set_context(vec![course("c1")], Some("s1".into())));
        assert!(viewer.set_context(vec![course("c1")], Some("s2".into())));
        assert!(viewer.set_context(Vec::new(), Some("s2".into())));
    }
}
