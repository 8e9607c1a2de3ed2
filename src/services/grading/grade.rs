use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradingService;
use crate::access::can_grade_submission;
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::submissions::responses::SubmissionResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::lookup::{load_assignment, load_course, load_submission, require_profile};

/// 分数必须为非负有限数，且不超过作业满分
fn validate_score(score: f64, assignment: &Assignment) -> Result<(), String> {
    if !score.is_finite() || score < 0.0 {
        return Err("Score must be a non-negative number".to_string());
    }
    if let Some(max) = assignment.max_score
        && score > max
    {
        return Err(format!("Score must not exceed {max}"));
    }
    Ok(())
}

pub async fn handle_grade_submission(
    service: &GradingService,
    request: &HttpRequest,
    submission_id: String,
    body: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let grader = match require_profile(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let submission = match load_submission(&storage, &submission_id).await {
        Ok(s) => s,
        Err(resp) => return Ok(resp),
    };
    let assignment = match load_assignment(&storage, &submission.assignment_id).await {
        Ok(a) => a,
        Err(resp) => return Ok(resp),
    };
    let course = match load_course(&storage, &assignment.course_id).await {
        Ok(c) => c,
        Err(resp) => return Ok(resp),
    };

    if !can_grade_submission(&grader, &course) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the course tutor or an admin can grade submissions",
        )));
    }

    if let Err(msg) = validate_score(body.score, &assignment) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let feedback = body
        .feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());

    match storage
        .grade_submission(&submission.id, body.score, feedback)
        .await
    {
        Ok(Some(graded)) => {
            info!(
                "提交 {} 已由 {} 批改，得分 {}",
                graded.id, grader.id, body.score
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionResponse::from(graded),
                "Submission graded",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => Ok(crate::services::error_response(&e, None)),
    }
}
