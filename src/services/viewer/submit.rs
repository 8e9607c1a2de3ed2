use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ViewerService;
use super::guard::IN_FLIGHT_SUBMISSIONS;
use crate::errors::AppError;
use crate::models::courses::entities::CourseSummary;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::submissions::responses::ViewerSubmitResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::services::lookup::{load_assignment, load_course, require_profile};
use crate::viewer::AssignmentViewer;

pub async fn handle_submit(
    service: &ViewerService,
    request: &HttpRequest,
    body: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let profile = match require_profile(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let assignment = match load_assignment(&storage, &body.assignment_id).await {
        Ok(a) => a,
        Err(resp) => return Ok(resp),
    };
    let course = match load_course(&storage, &assignment.course_id).await {
        Ok(c) => c,
        Err(resp) => return Ok(resp),
    };

    let Some(_guard) = IN_FLIGHT_SUBMISSIONS.acquire(&profile.id, &assignment.id) else {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SubmissionInFlight,
            "A submission for this assignment is already in progress",
        )));
    };

    let mut viewer =
        AssignmentViewer::new(vec![CourseSummary::from(&course)], Some(profile.id.clone()));
    viewer.refresh(&*storage).await;

    if let Err(e) = viewer.open_submission(&assignment.id) {
        let code = match &e {
            AppError::Conflict(_) => ErrorCode::SubmissionAlreadyExists,
            AppError::NotFound(_) => ErrorCode::AssignmentNotFound,
            _ => ErrorCode::BadRequest,
        };
        return Ok(error_response(&e, Some(code)));
    }
    viewer.set_submission_text(body.submission_text);

    match viewer.submit(&*storage).await {
        Ok(created) => {
            info!(
                "学生 {} 提交了作业 {} ({})",
                profile.id, assignment.id, created.id
            );
            let response = ViewerSubmitResponse {
                submission: created.into(),
                course: viewer.tree().courses.into_iter().next(),
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(
                response,
                "Assignment submitted successfully",
            )))
        }
        Err(e) => {
            let code = match &e {
                AppError::Conflict(_) => Some(ErrorCode::SubmissionAlreadyExists),
                _ => None,
            };
            Ok(error_response(&e, code))
        }
    }
}
