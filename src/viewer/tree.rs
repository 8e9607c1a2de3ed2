//! 展示树：课程分组 + 作业行

use serde::Serialize;
use ts_rs::TS;

use super::display::{AssignmentDisplayState, RowAction};
use super::index::{AssignmentIndex, SubmissionIndex};
use crate::models::assignments::entities::Assignment;
use crate::models::courses::entities::CourseSummary;

pub const EMPTY_MESSAGE: &str = "No courses to display";

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/viewer.ts")]
pub struct AssignmentRow {
    pub id: String,
    pub title: String,
    pub phase_number: i32,
    pub due_days: Option<i32>,
    pub max_score: Option<f64>,
    pub description: Option<String>,
    pub status: AssignmentDisplayState,
    pub status_label: String,
    pub actions: Vec<RowAction>,
    pub message: Option<String>,
}

impl AssignmentRow {
    fn build(assignment: &Assignment, submissions: &SubmissionIndex) -> Self {
        let status = AssignmentDisplayState::from_submission(submissions.submission_for(&assignment.id));
        Self {
            id: assignment.id.clone(),
            title: assignment.title.clone(),
            phase_number: assignment.phase_number,
            due_days: assignment.due_days,
            max_score: assignment.max_score,
            description: assignment.description.clone(),
            status_label: status.label().to_string(),
            actions: status.actions(),
            message: status.message().map(str::to_string),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/viewer.ts")]
pub struct CourseSection {
    pub course_id: String,
    pub title: String,
    pub current_phase: i32,
    pub completed: usize,
    pub total: usize,
    pub badge: String,
    pub assignments: Vec<AssignmentRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/viewer.ts")]
pub struct ViewerTree {
    pub empty: bool,
    pub message: Option<String>,
    pub courses: Vec<CourseSection>,
}

impl ViewerTree {
    pub fn empty() -> Self {
        Self {
            empty: true,
            message: Some(EMPTY_MESSAGE.to_string()),
            courses: Vec::new(),
        }
    }

    /// 按输入课程顺序构建；没有作业的课程仍然显示为 0/0
    pub fn build(
        courses: &[CourseSummary],
        has_identity: bool,
        assignments: &AssignmentIndex,
        submissions: &SubmissionIndex,
    ) -> Self {
        if courses.is_empty() || !has_identity {
            return Self::empty();
        }

        let sections = courses
            .iter()
            .map(|course| {
                let total = assignments.assignment_count(&course.id);
                let completed = submissions.completed_count(assignments, &course.id);
                CourseSection {
                    course_id: course.id.clone(),
                    title: course.title.clone(),
                    current_phase: course.current_phase,
                    completed,
                    total,
                    badge: format!("{completed}/{total} submitted"),
                    assignments: assignments
                        .for_course(&course.id)
                        .iter()
                        .map(|a| AssignmentRow::build(a, submissions))
                        .collect(),
                }
            })
            .collect();

        Self {
            empty: false,
            message: None,
            courses: sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::index::tests::{assignment, submission};

    fn summary(id: &str) -> CourseSummary {
        CourseSummary {
            id: id.to_string(),
            title: format!("Course {id}"),
            current_phase: 2,
        }
    }

    #[test]
    fn test_empty_states() {
        let assignments = AssignmentIndex::default();
        let submissions = SubmissionIndex::default();

        let tree = ViewerTree::build(&[], true, &assignments, &submissions);
        assert!(tree.empty);
        assert_eq!(tree.message.as_deref(), Some(EMPTY_MESSAGE));

        let tree = ViewerTree::build(&[summary("c1")], false, &assignments, &submissions);
        assert!(tree.empty);
    }

    #[test]
    fn test_sections_badges_and_rows() {
        let assignments = AssignmentIndex::group(vec![
            assignment("a2", "c1", 2),
            assignment("a1", "c1", 1),
            assignment("b1", "c2", 1),
        ]);
        let submissions = SubmissionIndex::build(vec![submission("x1", "a1", "pending")]);

        let tree = ViewerTree::build(
            &[summary("c1"), summary("c2"), summary("c3")],
            true,
            &assignments,
            &submissions,
        );

        assert!(!tree.empty);
        let badges: Vec<_> = tree.courses.iter().map(|c| c.badge.as_str()).collect();
        assert_eq!(badges, ["1/2 submitted", "0/1 submitted", "0/0 submitted"]);

        let rows = &tree.courses[0].assignments;
        assert_eq!(rows[0].id, "a1");
        assert_eq!(rows[0].status, AssignmentDisplayState::Pending);
        assert_eq!(rows[0].message.as_deref(), Some("Awaiting review"));
        assert_eq!(rows[1].status_label, "Not submitted");
        assert_eq!(rows[1].actions, vec![RowAction::Submit]);
    }
}
