//! 数据加载
//!
//! 每次加载携带单调递增的代号，只有最新一次发起的加载结果会被采纳，
//! 过期的响应直接丢弃。

use async_trait::async_trait;
use futures_util::future;
use tracing::{debug, error, warn};

use crate::errors::Result;
use crate::models::assignments::entities::Assignment;
use crate::models::courses::entities::CourseSummary;
use crate::models::submissions::entities::{NewSubmission, Submission};
use crate::storage::Storage;

/// 视图读取与写入所需的数据源
#[async_trait]
pub trait AssignmentSource: Send + Sync {
    async fn fetch_assignments(&self, course_ids: &[String]) -> Result<Vec<Assignment>>;
    async fn fetch_submissions(&self, student_id: &str) -> Result<Vec<Submission>>;
    async fn insert_submission(&self, submission: NewSubmission) -> Result<Submission>;
}

#[async_trait]
impl<S: Storage + ?Sized> AssignmentSource for S {
    async fn fetch_assignments(&self, course_ids: &[String]) -> Result<Vec<Assignment>> {
        self.list_assignments_by_courses(course_ids).await
    }

    async fn fetch_submissions(&self, student_id: &str) -> Result<Vec<Submission>> {
        self.list_submissions_by_student(student_id).await
    }

    async fn insert_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.create_submission(submission).await
    }
}

/// 一次加载的上下文快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub course_ids: Vec<String>,
    pub student_id: Option<String>,
}

impl LoadTicket {
    pub fn new(generation: u64, courses: &[CourseSummary], student_id: Option<&str>) -> Self {
        Self {
            generation,
            course_ids: courses.iter().map(|c| c.id.clone()).collect(),
            student_id: student_id.map(str::to_string),
        }
    }

    /// 课程与身份是否一致（忽略代次）
    pub fn same_context(&self, other: &LoadTicket) -> bool {
        self.course_ids == other.course_ids && self.student_id == other.student_id
    }
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// 没有课程或没有身份，未发起任何请求
    Skipped { generation: u64 },
    Fetched {
        generation: u64,
        // None 表示作业读取失败，保留上一次的结果
        assignments: Option<Vec<Assignment>>,
        submissions: Vec<Submission>,
    },
}

impl LoadOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            LoadOutcome::Skipped { generation } | LoadOutcome::Fetched { generation, .. } => {
                *generation
            }
        }
    }
}

/// 执行一次加载
///
/// 两个读取相互独立并发执行。作业读取失败记录错误日志，
/// 提交读取失败按空列表处理，均不向用户报错。
pub async fn load<S: AssignmentSource + ?Sized>(source: &S, ticket: &LoadTicket) -> LoadOutcome {
    let generation = ticket.generation;
    let student_id = match ticket.student_id.as_deref() {
        Some(id) if !ticket.course_ids.is_empty() => id,
        _ => {
            debug!("跳过加载 #{generation}: 没有课程或身份");
            return LoadOutcome::Skipped { generation };
        }
    };

    let (assignments, submissions) = future::join(
        source.fetch_assignments(&ticket.course_ids),
        source.fetch_submissions(student_id),
    )
    .await;

    let assignments = match assignments {
        Ok(list) => Some(list),
        Err(e) => {
            error!("加载作业失败 #{generation}: {}", e);
            None
        }
    };
    let submissions = submissions.unwrap_or_else(|e| {
        warn!("加载提交失败 #{generation}，按空列表处理: {}", e);
        Vec::new()
    });

    LoadOutcome::Fetched {
        generation,
        assignments,
        submissions,
    }
}
