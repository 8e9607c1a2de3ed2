pub mod assignments;
pub mod common;
pub mod courses;
pub mod materials;
pub mod objects;
pub mod profiles;
pub mod submissions;

pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码，随 `ApiResponse.code` 返回给前端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 请求错误
    BadRequest = 1000,
    ValidationFailed = 1001,

    // 认证授权
    Unauthorized = 2000,
    Forbidden = 2001,

    // 资源不存在
    NotFound = 3000,
    CourseNotFound = 3001,
    AssignmentNotFound = 3002,
    SubmissionNotFound = 3003,
    MaterialNotFound = 3004,
    FileNotFound = 3005,
    BucketNotFound = 3006,

    // 状态冲突
    Conflict = 4000,
    SubmissionAlreadyExists = 4001,
    SubmissionInFlight = 4002,
    SubmissionNotGraded = 4003,

    // 文件
    FileUploadFailed = 5000,
    FileSizeExceeded = 5001,
    MultifileUploadNotAllowed = 5002,
    FileTypeNotAllowed = 5003,

    RateLimitExceeded = 6000,

    InternalServerError = 9000,
}
