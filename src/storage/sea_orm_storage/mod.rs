//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod materials;
mod objects;
mod profiles;
mod submissions;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 基于已有连接创建存储实例并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| AppError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AppError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AppError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AppError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::entities::{Assignment, NewAssignment},
    courses::entities::{Course, NewCourse},
    materials::{entities::LessonMaterial, requests::NewLessonMaterial},
    objects::entities::{NewStorageObject, StorageBucket, StorageObject},
    profiles::entities::{NewProfile, Profile},
    submissions::entities::{NewSubmission, Submission},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户资料模块
    async fn create_profile(&self, profile: NewProfile) -> Result<Profile> {
        self.create_profile_impl(profile).await
    }

    async fn get_profile_by_id(&self, id: &str) -> Result<Option<Profile>> {
        self.get_profile_by_id_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, course: NewCourse) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: &str) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn get_courses_by_ids(&self, ids: &[String]) -> Result<Vec<Course>> {
        self.get_courses_by_ids_impl(ids).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, id: &str) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_by_courses(&self, course_ids: &[String]) -> Result<Vec<Assignment>> {
        self.list_assignments_by_courses_impl(course_ids).await
    }

    // 提交模块
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: &str) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_submissions_by_student(&self, student_id: &str) -> Result<Vec<Submission>> {
        self.list_submissions_by_student_impl(student_id).await
    }

    async fn grade_submission(
        &self,
        id: &str,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(id, score, feedback).await
    }

    // 课程资料模块
    async fn list_materials_by_course(&self, course_id: &str) -> Result<Vec<LessonMaterial>> {
        self.list_materials_by_course_impl(course_id).await
    }

    async fn get_material_by_id(&self, id: &str) -> Result<Option<LessonMaterial>> {
        self.get_material_by_id_impl(id).await
    }

    async fn create_material(&self, material: NewLessonMaterial) -> Result<LessonMaterial> {
        self.create_material_impl(material).await
    }

    async fn delete_material(&self, id: &str) -> Result<bool> {
        self.delete_material_impl(id).await
    }

    // 对象存储模块
    async fn get_bucket(&self, id: &str) -> Result<Option<StorageBucket>> {
        self.get_bucket_impl(id).await
    }

    async fn put_object(&self, object: NewStorageObject) -> Result<StorageObject> {
        self.put_object_impl(object).await
    }

    async fn get_object(&self, bucket_id: &str, name: &str) -> Result<Option<StorageObject>> {
        self.get_object_impl(bucket_id, name).await
    }

    async fn delete_object(&self, bucket_id: &str, name: &str) -> Result<bool> {
        self.delete_object_impl(bucket_id, name).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::models::{
        assignments::entities::{Assignment, NewAssignment},
        courses::entities::{Course, NewCourse},
        profiles::entities::{NewProfile, Profile, ProfileRole},
    };
    use crate::storage::Storage;
    use sea_orm::{ConnectOptions, Database};

    /// 内存 SQLite，单连接保证所有查询落在同一个数据库上
    pub async fn memory_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        SeaOrmStorage::from_connection(db).await.unwrap()
    }

    pub async fn seed_profile(storage: &SeaOrmStorage, id: &str, role: ProfileRole) -> Profile {
        storage
            .create_profile(NewProfile {
                id: id.to_string(),
                display_name: format!("User {id}"),
                role,
            })
            .await
            .unwrap()
    }

    pub async fn seed_course(storage: &SeaOrmStorage, title: &str, tutor_id: Option<&str>) -> Course {
        storage
            .create_course(NewCourse {
                title: title.to_string(),
                current_phase: 1,
                tutor_id: tutor_id.map(str::to_string),
            })
            .await
            .unwrap()
    }

    pub async fn seed_assignment(
        storage: &SeaOrmStorage,
        course_id: &str,
        phase_number: i32,
        title: &str,
    ) -> Assignment {
        storage
            .create_assignment(NewAssignment {
                course_id: course_id.to_string(),
                phase_number,
                title: title.to_string(),
                description: None,
                due_days: Some(7),
                max_score: Some(100.0),
            })
            .await
            .unwrap()
    }

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("data.db").unwrap(),
            "sqlite://data.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://localhost/app").is_ok());
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
