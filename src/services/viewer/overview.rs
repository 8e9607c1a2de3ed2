use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ViewerService;
use crate::models::courses::entities::CourseSummary;
use crate::models::courses::requests::ViewerQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::lookup::require_profile;
use crate::utils::validate::parse_id_list;
use crate::viewer::AssignmentViewer;

pub async fn handle_overview(
    service: &ViewerService,
    request: &HttpRequest,
    query: ViewerQuery,
) -> ActixResult<HttpResponse> {
    let profile = match require_profile(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    let course_ids = match parse_id_list(query.course_ids.as_deref().unwrap_or_default()) {
        Ok(ids) => ids,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    };

    let storage = service.get_storage(request);

    let courses = match storage.get_courses_by_ids(&course_ids).await {
        Ok(courses) => courses,
        Err(e) => {
            error!("查询课程失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to query courses",
                )),
            );
        }
    };

    // 保持请求中的课程顺序，未知课程忽略
    let summaries: Vec<CourseSummary> = course_ids
        .iter()
        .filter_map(|id| courses.iter().find(|c| &c.id == id))
        .map(CourseSummary::from)
        .collect();

    let mut viewer = AssignmentViewer::new(summaries, Some(profile.id));
    viewer.refresh(&*storage).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(viewer.tree(), "Success")))
}
