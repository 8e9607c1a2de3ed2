use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: String,
    pub title: String,
    // 当前所处阶段
    pub current_phase: i32,
    // 负责该课程的导师
    pub tutor_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 作业视图需要的课程摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub current_phase: i32,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            current_phase: course.current_phase,
        }
    }
}

// 用于存储层的内部参数
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub current_phase: i32,
    pub tutor_id: Option<String>,
}
