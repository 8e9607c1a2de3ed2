//! 访问控制策略
//!
//! 与迁移中声明的 PostgreSQL 行级安全策略一一对应，在进程内对同样的谓词求值，
//! 使 SQLite / MySQL 部署也具备相同的访问边界。
//!
//! - `buckets`: 对象存储桶策略（lesson-materials / assignments）
//! - `tables`: lesson_materials 表与批改操作的策略

pub mod buckets;
pub mod tables;

pub use buckets::{Bucket, ObjectAction, ObjectPath, can_access_object};
pub use tables::{can_grade_submission, can_read_materials, can_write_materials};

use crate::models::courses::entities::Course;
use crate::models::profiles::entities::{Profile, ProfileRole};

/// 当前身份是否为该课程的导师
pub(crate) fn is_course_tutor(identity: &Profile, course: &Course) -> bool {
    identity.role == ProfileRole::Tutor && course.tutor_id.as_deref() == Some(identity.id.as_str())
}

pub(crate) fn is_admin(identity: &Profile) -> bool {
    identity.role == ProfileRole::Admin
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::courses::entities::Course;
    use crate::models::profiles::entities::{Profile, ProfileRole};

    pub fn profile(id: &str, role: ProfileRole) -> Profile {
        Profile {
            id: id.to_string(),
            display_name: id.to_string(),
            role,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn course(id: &str, tutor_id: Option<&str>) -> Course {
        Course {
            id: id.to_string(),
            title: format!("Course {id}"),
            current_phase: 1,
            tutor_id: tutor_id.map(str::to_string),
            created_at: chrono::Utc::now(),
        }
    }
}
