use serde::Deserialize;
use ts_rs::TS;

/// 作业视图查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct ViewerQuery {
    // 逗号分隔的课程 ID
    pub course_ids: Option<String>,
}
