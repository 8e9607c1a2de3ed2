//! 课程资料存储操作

use super::SeaOrmStorage;
use crate::entity::lesson_materials::{ActiveModel, Column, Entity as LessonMaterials};
use crate::errors::{AppError, Result};
use crate::models::materials::{entities::LessonMaterial, requests::NewLessonMaterial};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出课程资料
    pub async fn list_materials_by_course_impl(
        &self,
        course_id: &str,
    ) -> Result<Vec<LessonMaterial>> {
        let result = LessonMaterials::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询课程资料失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_material()).collect())
    }

    /// 通过 ID 获取课程资料
    pub async fn get_material_by_id_impl(&self, id: &str) -> Result<Option<LessonMaterial>> {
        let result = LessonMaterials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询课程资料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 创建课程资料
    pub async fn create_material_impl(&self, req: NewLessonMaterial) -> Result<LessonMaterial> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            course_id: Set(req.course_id),
            title: Set(req.title),
            object_path: Set(req.object_path),
            uploaded_by: Set(req.uploaded_by),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("创建课程资料失败: {e}")))?;

        Ok(result.into_material())
    }

    /// 删除课程资料
    pub async fn delete_material_impl(&self, id: &str) -> Result<bool> {
        let result = LessonMaterials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("删除课程资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::materials::requests::NewLessonMaterial;
    use crate::models::profiles::entities::ProfileRole;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::{memory_storage, seed_course, seed_profile};

    #[tokio::test]
    async fn test_material_lifecycle() {
        let storage = memory_storage().await;
        seed_profile(&storage, "t1", ProfileRole::Tutor).await;
        let course = seed_course(&storage, "Course", Some("t1")).await;

        let created = storage
            .create_material(NewLessonMaterial {
                course_id: course.id.clone(),
                title: "Week 1 slides".into(),
                object_path: format!("{}/week1.pdf", course.id),
                uploaded_by: "t1".into(),
            })
            .await
            .unwrap();

        let listed = storage.list_materials_by_course(&course.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Week 1 slides");

        assert!(storage.delete_material(&created.id).await.unwrap());
        assert!(!storage.delete_material(&created.id).await.unwrap());
        assert!(storage.get_material_by_id(&created.id).await.unwrap().is_none());
    }
}
