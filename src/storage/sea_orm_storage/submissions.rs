//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::assignment_submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{AppError, Result};
use crate::models::submissions::entities::{NewSubmission, Submission, SubmissionStatus};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建提交
    ///
    /// (assignment_id, student_id) 上有唯一索引，重复插入映射为 Conflict。
    pub async fn create_submission_impl(&self, req: NewSubmission) -> Result<Submission> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            assignment_id: Set(req.assignment_id),
            student_id: Set(req.student_id),
            submission_text: Set(Some(req.submission_text)),
            score: Set(None),
            feedback: Set(None),
            status: Set(SubmissionStatus::PENDING.to_string()),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            graded_at: Set(None),
        };

        let result = model.insert(&self.db).await.map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::conflict("该作业已提交"),
            other => AppError::database_operation(format!("创建提交失败: {}", other.message())),
        })?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: &str) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出学生的全部提交
    pub async fn list_submissions_by_student_impl(
        &self,
        student_id: &str,
    ) -> Result<Vec<Submission>> {
        let result = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 批改提交，状态推进为 graded
    pub async fn grade_submission_impl(
        &self,
        id: &str,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let existing = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.score = Set(Some(score));
        model.feedback = Set(feedback);
        model.status = Set(SubmissionStatus::GRADED.to_string());
        model.graded_at = Set(Some(chrono::Utc::now().timestamp()));

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("批改提交失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::AppError;
    use crate::models::profiles::entities::ProfileRole;
    use crate::models::submissions::entities::{NewSubmission, SubmissionStatus};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::{
        memory_storage, seed_assignment, seed_course, seed_profile,
    };

    fn new_submission(assignment_id: &str, student_id: &str, text: &str) -> NewSubmission {
        NewSubmission {
            assignment_id: assignment_id.to_string(),
            student_id: student_id.to_string(),
            submission_text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_submission_is_pending() {
        let storage = memory_storage().await;
        seed_profile(&storage, "s1", ProfileRole::Student).await;
        let course = seed_course(&storage, "Course", None).await;
        let assignment = seed_assignment(&storage, &course.id, 1, "Essay").await;

        let created = storage
            .create_submission(new_submission(&assignment.id, "s1", "My answer"))
            .await
            .unwrap();

        assert_eq!(created.status(), SubmissionStatus::Pending);
        assert_eq!(created.submission_text.as_deref(), Some("My answer"));
        assert!(created.score.is_none());
        assert!(created.graded_at.is_none());

        let listed = storage.list_submissions_by_student("s1").await.unwrap();
        assert_eq!(listed, vec![created]);
        assert!(storage.list_submissions_by_student("s2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_conflict() {
        let storage = memory_storage().await;
        seed_profile(&storage, "s1", ProfileRole::Student).await;
        seed_profile(&storage, "s2", ProfileRole::Student).await;
        let course = seed_course(&storage, "Course", None).await;
        let assignment = seed_assignment(&storage, &course.id, 1, "Essay").await;

        storage
            .create_submission(new_submission(&assignment.id, "s1", "first"))
            .await
            .unwrap();
        let err = storage
            .create_submission(new_submission(&assignment.id, "s1", "second"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // 其他学生不受影响
        storage
            .create_submission(new_submission(&assignment.id, "s2", "mine"))
            .await
            .unwrap();
        assert_eq!(storage.list_submissions_by_student("s1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_grade_submission() {
        let storage = memory_storage().await;
        seed_profile(&storage, "s1", ProfileRole::Student).await;
        let course = seed_course(&storage, "Course", None).await;
        let assignment = seed_assignment(&storage, &course.id, 1, "Essay").await;
        let created = storage
            .create_submission(new_submission(&assignment.id, "s1", "My answer"))
            .await
            .unwrap();

        let graded = storage
            .grade_submission(&created.id, 85.0, Some("Good work".into()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(graded.status(), SubmissionStatus::Graded);
        assert_eq!(graded.score, Some(85.0));
        assert_eq!(graded.feedback.as_deref(), Some("Good work"));
        assert_eq!(graded.submission_text.as_deref(), Some("My answer"));
        assert!(graded.graded_at.is_some());

        assert!(
            storage
                .grade_submission("missing", 1.0, None)
                .await
                .unwrap()
                .is_none()
        );
    }
}
