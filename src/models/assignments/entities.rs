use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: String,
    // 所属课程 ID
    pub course_id: String,
    // 所属阶段
    pub phase_number: i32,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: Option<String>,
    // 截止天数（相对阶段开始）
    pub due_days: Option<i32>,
    // 满分
    pub max_score: Option<f64>,
}

// 用于存储层的内部参数
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub course_id: String,
    pub phase_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub due_days: Option<i32>,
    pub max_score: Option<f64>,
}
