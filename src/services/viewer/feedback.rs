use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ViewerService;
use crate::errors::AppError;
use crate::models::courses::entities::CourseSummary;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::services::lookup::{load_assignment, load_course, require_profile};
use crate::viewer::AssignmentViewer;

pub async fn handle_feedback(
    service: &ViewerService,
    request: &HttpRequest,
    assignment_id: String,
) -> ActixResult<HttpResponse> {
    let profile = match require_profile(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let assignment = match load_assignment(&storage, &assignment_id).await {
        Ok(a) => a,
        Err(resp) => return Ok(resp),
    };
    let course = match load_course(&storage, &assignment.course_id).await {
        Ok(c) => c,
        Err(resp) => return Ok(resp),
    };

    let mut viewer = AssignmentViewer::new(vec![CourseSummary::from(&course)], Some(profile.id));
    viewer.refresh(&*storage).await;

    match viewer.open_feedback(&assignment.id) {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(view.clone(), "Success"))),
        Err(e) => {
            let code = match &e {
                AppError::NotFound(_) => ErrorCode::SubmissionNotFound,
                AppError::Validation(_) => ErrorCode::SubmissionNotGraded,
                _ => ErrorCode::InternalServerError,
            };
            Ok(error_response(&e, Some(code)))
        }
    }
}
