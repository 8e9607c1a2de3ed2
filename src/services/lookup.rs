//! 服务层通用查询：身份、课程、作业、提交
//!
//! 失败时直接返回可用于响应的 `HttpResponse`。

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::assignments::entities::Assignment;
use crate::models::courses::entities::Course;
use crate::models::profiles::entities::Profile;
use crate::models::submissions::entities::Submission;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::validate_id;

pub(crate) fn require_profile(req: &HttpRequest) -> Result<Profile, HttpResponse> {
    RequireJWT::extract_profile(req).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unable to resolve current user",
        ))
    })
}

pub(crate) fn check_id(id: &str) -> Result<(), HttpResponse> {
    validate_id(id).map_err(|msg| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
    })
}

fn internal_error(what: &str, e: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("查询{what}失败: {e}");
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("Failed to query {what}"),
    ))
}

pub(crate) async fn load_course(
    storage: &Arc<dyn Storage>,
    course_id: &str,
) -> Result<Course, HttpResponse> {
    check_id(course_id)?;
    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Err(internal_error("course", e)),
    }
}

pub(crate) async fn load_assignment(
    storage: &Arc<dyn Storage>,
    assignment_id: &str,
) -> Result<Assignment, HttpResponse> {
    check_id(assignment_id)?;
    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => Ok(assignment),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Err(internal_error("assignment", e)),
    }
}

pub(crate) async fn load_submission(
    storage: &Arc<dyn Storage>,
    submission_id: &str,
) -> Result<Submission, HttpResponse> {
    check_id(submission_id)?;
    match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => Ok(submission),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => Err(internal_error("submission", e)),
    }
}
