//! 作业与提交的分组索引

use std::collections::HashMap;

use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;

/// 课程 ID → 该课程下按阶段升序排列的作业
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentIndex {
    by_course: HashMap<String, Vec<Assignment>>,
}

impl AssignmentIndex {
    /// 按课程分组，同阶段保持输入顺序
    pub fn group(assignments: Vec<Assignment>) -> Self {
        let mut by_course: HashMap<String, Vec<Assignment>> = HashMap::new();
        for assignment in assignments {
            by_course
                .entry(assignment.course_id.clone())
                .or_default()
                .push(assignment);
        }
        for list in by_course.values_mut() {
            list.sort_by_key(|a| a.phase_number);
        }
        Self { by_course }
    }

    pub fn for_course(&self, course_id: &str) -> &[Assignment] {
        self.by_course
            .get(course_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn course_ids(&self) -> impl Iterator<Item = &str> {
        self.by_course.keys().map(String::as_str)
    }

    pub fn assignment_count(&self, course_id: &str) -> usize {
        self.for_course(course_id).len()
    }

    pub fn find(&self, assignment_id: &str) -> Option<&Assignment> {
        self.by_course
            .values()
            .flatten()
            .find(|a| a.id == assignment_id)
    }

    pub fn is_empty(&self) -> bool {
        self.by_course.is_empty()
    }
}

/// 作业 ID → 当前学生的提交
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionIndex {
    by_assignment: HashMap<String, Submission>,
}

impl SubmissionIndex {
    /// 同一作业出现多条提交时保留存储顺序中的第一条
    pub fn build(submissions: Vec<Submission>) -> Self {
        let mut by_assignment = HashMap::with_capacity(submissions.len());
        for submission in submissions {
            by_assignment
                .entry(submission.assignment_id.clone())
                .or_insert(submission);
        }
        Self { by_assignment }
    }

    pub fn submission_for(&self, assignment_id: &str) -> Option<&Submission> {
        self.by_assignment.get(assignment_id)
    }

    pub fn len(&self) -> usize {
        self.by_assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_assignment.is_empty()
    }

    /// 已提交（任意状态）的作业数
    pub fn completed_count(&self, assignments: &AssignmentIndex, course_id: &str) -> usize {
        assignments
            .for_course(course_id)
            .iter()
            .filter(|a| self.by_assignment.contains_key(&a.id))
            .count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;

    pub fn assignment(id: &str, course_id: &str, phase: i32) -> Assignment {
        Assignment {
            id: id.to_string(),
            course_id: course_id.to_string(),
            phase_number: phase,
            title: format!("Assignment {id}"),
            description: None,
            due_days: None,
            max_score: None,
        }
    }

    pub fn submission(id: &str, assignment_id: &str, status: &str) -> Submission {
        Submission {
            id: id.to_string(),
            assignment_id: assignment_id.to_string(),
            student_id: "s1".to_string(),
            submission_text: Some(format!("text {id}")),
            score: None,
            feedback: None,
            status: status.to_string(),
            submitted_at: chrono::Utc::now(),
            graded_at: None,
        }
    }

    #[test]
    fn test_group_keys_are_distinct_course_ids() {
        let index = AssignmentIndex::group(vec![
            assignment("a1", "c1", 2),
            assignment("a2", "c2", 1),
            assignment("a3", "c1", 1),
            assignment("a4", "c1", 2),
        ]);

        let keys: HashSet<_> = index.course_ids().collect();
        assert_eq!(keys, HashSet::from(["c1", "c2"]));

        let c1: Vec<_> = index.for_course("c1").iter().map(|a| a.id.as_str()).collect();
        // 阶段升序，同阶段保持原顺序
        assert_eq!(c1, ["a3", "a1", "a4"]);
        assert_eq!(index.assignment_count("c2"), 1);
        assert_eq!(index.assignment_count("c3"), 0);
        assert!(AssignmentIndex::group(Vec::new()).is_empty());
    }

    #[test]
    fn test_submission_lookup_first_wins() {
        let index = SubmissionIndex::build(vec![
            submission("x1", "a1", "graded"),
            submission("x2", "a1", "pending"),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.submission_for("a1").map(|s| s.id.as_str()), Some("x1"));
        assert!(index.submission_for("a2").is_none());
    }

    #[test]
    fn test_completed_counts_any_status() {
        let assignments = AssignmentIndex::group(vec![
            assignment("a1", "c1", 1),
            assignment("a2", "c1", 2),
            assignment("a3", "c1", 3),
            assignment("b1", "c2", 1),
        ]);
        let submissions = SubmissionIndex::build(vec![
            submission("x1", "a1", "pending"),
            submission("x2", "a2", "returned"),
            submission("x3", "zz", "graded"),
        ]);

        assert_eq!(submissions.completed_count(&assignments, "c1"), 2);
        assert_eq!(submissions.completed_count(&assignments, "c2"), 0);
    }
}
