use std::sync::Arc;

use crate::models::{
    assignments::entities::{Assignment, NewAssignment},
    courses::entities::{Course, NewCourse},
    materials::{entities::LessonMaterial, requests::NewLessonMaterial},
    objects::entities::{NewStorageObject, StorageBucket, StorageObject},
    profiles::entities::{NewProfile, Profile},
    submissions::entities::{NewSubmission, Submission},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户资料方法
    // 创建用户资料
    async fn create_profile(&self, profile: NewProfile) -> Result<Profile>;
    // 通过ID获取用户资料
    async fn get_profile_by_id(&self, id: &str) -> Result<Option<Profile>>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: NewCourse) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, id: &str) -> Result<Option<Course>>;
    // 批量获取课程，按标题排序
    async fn get_courses_by_ids(&self, ids: &[String]) -> Result<Vec<Course>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: &str) -> Result<Option<Assignment>>;
    // 列出若干课程下的作业，按阶段升序
    async fn list_assignments_by_courses(&self, course_ids: &[String]) -> Result<Vec<Assignment>>;

    /// 提交管理方法
    // 创建提交，状态为 pending；重复提交返回 Conflict
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: &str) -> Result<Option<Submission>>;
    // 列出学生的全部提交（存储顺序）
    async fn list_submissions_by_student(&self, student_id: &str) -> Result<Vec<Submission>>;
    // 批改提交
    async fn grade_submission(
        &self,
        id: &str,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;

    /// 课程资料方法
    // 列出课程资料
    async fn list_materials_by_course(&self, course_id: &str) -> Result<Vec<LessonMaterial>>;
    // 通过ID获取课程资料
    async fn get_material_by_id(&self, id: &str) -> Result<Option<LessonMaterial>>;
    // 创建课程资料
    async fn create_material(&self, material: NewLessonMaterial) -> Result<LessonMaterial>;
    // 删除课程资料
    async fn delete_material(&self, id: &str) -> Result<bool>;

    /// 对象存储元数据方法
    // 获取存储桶
    async fn get_bucket(&self, id: &str) -> Result<Option<StorageBucket>>;
    // 写入对象元数据（同名覆盖）
    async fn put_object(&self, object: NewStorageObject) -> Result<StorageObject>;
    // 获取对象元数据
    async fn get_object(&self, bucket_id: &str, name: &str) -> Result<Option<StorageObject>>;
    // 删除对象元数据
    async fn delete_object(&self, bucket_id: &str, name: &str) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
