use once_cell::sync::Lazy;
use regex::Regex;

use super::{is_admin, is_course_tutor};
use crate::models::courses::entities::Course;
use crate::models::profiles::entities::{Profile, ProfileRole};

static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("Invalid path segment regex"));

/// 已知的存储桶
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// 课程资料，公开可读
    LessonMaterials,
    /// 作业提交文件，私有
    Assignments,
}

impl Bucket {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            migration::LESSON_MATERIALS_BUCKET => Some(Bucket::LessonMaterials),
            migration::ASSIGNMENTS_BUCKET => Some(Bucket::Assignments),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Bucket::LessonMaterials => migration::LESSON_MATERIALS_BUCKET,
            Bucket::Assignments => migration::ASSIGNMENTS_BUCKET,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Bucket::LessonMaterials)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAction {
    Read,
    /// 新建、覆盖与删除
    Write,
}

/// 校验过的对象路径，按 `/` 分段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPath {
    segments: Vec<String>,
}

impl ObjectPath {
    /// 拒绝空路径、空段、`.`/`..` 以及非法字符
    pub fn parse(path: &str) -> Result<Self, &'static str> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Err("Object path is empty");
        }
        let segments: Vec<String> = path.split('/').map(str::to_string).collect();
        for segment in &segments {
            if segment == "." || segment == ".." {
                return Err("Object path must not contain relative segments");
            }
            if !SEGMENT_RE.is_match(segment) {
                return Err("Object path contains invalid characters");
            }
        }
        Ok(Self { segments })
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    pub fn file_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn as_key(&self) -> String {
        self.segments.join("/")
    }

    /// lesson-materials 桶的路径以课程 ID 开头
    pub fn course_id(&self, bucket: Bucket) -> Option<&str> {
        match bucket {
            Bucket::LessonMaterials => self.segment(0),
            Bucket::Assignments => None,
        }
    }

    /// assignments 桶中 `submissions/{student_id}/...` 的学生 ID
    fn submission_owner(&self) -> Option<&str> {
        if self.segments.len() >= 3 && self.segment(0) == Some("submissions") {
            self.segment(1)
        } else {
            None
        }
    }
}

/// 对单个对象请求求值
///
/// `course` 为路径首段对应的课程（仅 lesson-materials 桶需要）。
pub fn can_access_object(
    bucket: Bucket,
    action: ObjectAction,
    path: &ObjectPath,
    identity: Option<&Profile>,
    course: Option<&Course>,
) -> bool {
    match (bucket, action) {
        (Bucket::LessonMaterials, ObjectAction::Read) => true,
        (Bucket::LessonMaterials, ObjectAction::Write) => match identity {
            Some(user) if is_admin(user) => true,
            Some(user) => course
                .filter(|c| path.course_id(bucket) == Some(c.id.as_str()))
                .is_some_and(|c| is_course_tutor(user, c)),
            None => false,
        },
        (Bucket::Assignments, action) => match identity {
            Some(user) if is_admin(user) => true,
            Some(user) if user.role == ProfileRole::Tutor && action == ObjectAction::Read => true,
            Some(user) => path.submission_owner() == Some(user.id.as_str()),
            None => false,
        },
    }
}
