use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::access::can_read_materials;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::services::lookup::load_course;

pub async fn handle_list_materials(
    service: &MaterialService,
    request: &HttpRequest,
    course_id: String,
) -> ActixResult<HttpResponse> {
    let identity = RequireJWT::extract_profile(request);
    if !can_read_materials(identity.as_ref()) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Not allowed to read lesson materials",
        )));
    }

    let storage = service.get_storage(request);
    let course = match load_course(&storage, &course_id).await {
        Ok(c) => c,
        Err(resp) => return Ok(resp),
    };

    match storage.list_materials_by_course(&course.id).await {
        Ok(materials) => Ok(HttpResponse::Ok().json(ApiResponse::success(materials, "Success"))),
        Err(e) => Ok(error_response(&e, None)),
    }
}
