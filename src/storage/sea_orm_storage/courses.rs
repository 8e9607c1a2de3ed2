//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{AppError, Result};
use crate::models::courses::entities::{Course, NewCourse};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: NewCourse) -> Result<Course> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title: Set(req.title),
            current_phase: Set(req.current_phase),
            tutor_id: Set(req.tutor_id),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: &str) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 批量获取课程
    pub async fn get_courses_by_ids_impl(&self, ids: &[String]) -> Result<Vec<Course>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Courses::find()
            .filter(Column::Id.is_in(ids.iter().cloned()))
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await
            .map_err(|e| AppError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_course()).collect())
    }
}
