pub mod grading;
pub mod lookup;
pub mod materials;
pub mod objects;
pub mod viewer;

pub use grading::GradingService;
pub use materials::MaterialService;
pub use objects::ObjectService;
pub use viewer::ViewerService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从请求的 app_data 中取出共享存储
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 将业务错误映射为 HTTP 响应
pub(crate) fn error_response(err: &AppError, code: Option<ErrorCode>) -> HttpResponse {
    match err {
        AppError::Validation(msg) => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            code.unwrap_or(ErrorCode::ValidationFailed),
            msg.as_str(),
        )),
        AppError::NotFound(msg) => HttpResponse::NotFound().json(ApiResponse::error_empty(
            code.unwrap_or(ErrorCode::NotFound),
            msg.as_str(),
        )),
        AppError::Conflict(msg) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            code.unwrap_or(ErrorCode::Conflict),
            msg.as_str(),
        )),
        AppError::Authentication(msg) => HttpResponse::Unauthorized().json(
            ApiResponse::error_empty(code.unwrap_or(ErrorCode::Unauthorized), msg.as_str()),
        ),
        AppError::Authorization(msg) => HttpResponse::Forbidden().json(ApiResponse::error_empty(
            code.unwrap_or(ErrorCode::Forbidden),
            msg.as_str(),
        )),
        other => {
            tracing::error!("{}", other.format_simple());
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                code.unwrap_or(ErrorCode::InternalServerError),
                other.message(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::conflict("x"), StatusCode::CONFLICT),
            (AppError::authentication("x"), StatusCode::UNAUTHORIZED),
            (AppError::authorization("x"), StatusCode::FORBIDDEN),
            (
                AppError::database_operation("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(&err, None).status(), status);
        }
    }
}
