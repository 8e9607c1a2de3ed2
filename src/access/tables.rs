use super::{is_admin, is_course_tutor};
use crate::models::courses::entities::Course;
use crate::models::profiles::entities::Profile;

/// lesson_materials 表对所有人开放读取
pub fn can_read_materials(_identity: Option<&Profile>) -> bool {
    true
}

/// 仅课程导师与管理员可新增、修改、删除课程资料
pub fn can_write_materials(identity: Option<&Profile>, course: &Course) -> bool {
    identity.is_some_and(|user| is_admin(user) || is_course_tutor(user, course))
}

/// 批改提交：该课程导师或管理员
pub fn can_grade_submission(identity: &Profile, course: &Course) -> bool {
    is_admin(identity) || is_course_tutor(identity, course)
}
