//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{AppError, Result};
use crate::models::assignments::entities::{Assignment, NewAssignment};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: NewAssignment) -> Result<Assignment> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            course_id: Set(req.course_id),
            phase_number: Set(req.phase_number),
            title: Set(req.title),
            description: Set(req.description),
            due_days: Set(req.due_days),
            max_score: Set(req.max_score),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: &str) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出若干课程下的作业，按阶段升序
    pub async fn list_assignments_by_courses_impl(
        &self,
        course_ids: &[String],
    ) -> Result<Vec<Assignment>> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Assignments::find()
            .filter(Column::CourseId.is_in(course_ids.iter().cloned()))
            .order_by_asc(Column::PhaseNumber)
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_assignment()).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::{
        memory_storage, seed_assignment, seed_course,
    };

    #[tokio::test]
    async fn test_list_assignments_filters_courses_and_orders_by_phase() {
        let storage = memory_storage().await;
        let c1 = seed_course(&storage, "Course 1", None).await;
        let c2 = seed_course(&storage, "Course 2", None).await;
        let c3 = seed_course(&storage, "Course 3", None).await;

        seed_assignment(&storage, &c1.id, 3, "c1 p3").await;
        seed_assignment(&storage, &c2.id, 1, "c2 p1").await;
        seed_assignment(&storage, &c1.id, 1, "c1 p1").await;
        seed_assignment(&storage, &c3.id, 2, "c3 p2").await;

        let list = storage
            .list_assignments_by_courses(&[c1.id.clone(), c2.id.clone()])
            .await
            .unwrap();

        assert_eq!(list.len(), 3);
        assert!(list.iter().all(|a| a.course_id != c3.id));
        let phases: Vec<_> = list.iter().map(|a| a.phase_number).collect();
        assert_eq!(phases, [1, 1, 3]);
    }

    #[tokio::test]
    async fn test_assignment_requires_existing_course() {
        let storage = memory_storage().await;
        let result = storage
            .create_assignment(crate::models::assignments::entities::NewAssignment {
                course_id: "missing".into(),
                phase_number: 1,
                title: "Orphan".into(),
                description: None,
                due_days: None,
                max_score: None,
            })
            .await;
        assert!(result.is_err());
    }
}
