use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MaterialService;
use crate::access::can_write_materials;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::services::lookup::{check_id, load_course, require_profile};

pub async fn handle_delete_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: String,
) -> ActixResult<HttpResponse> {
    let profile = match require_profile(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_id(&material_id) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    let material = match storage.get_material_by_id(&material_id).await {
        Ok(Some(m)) => m,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MaterialNotFound,
                "Lesson material not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, None)),
    };

    let course = match load_course(&storage, &material.course_id).await {
        Ok(c) => c,
        Err(resp) => return Ok(resp),
    };

    if !can_write_materials(Some(&profile), &course) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the course tutor or an admin can manage lesson materials",
        )));
    }

    match storage.delete_material(&material.id).await {
        Ok(true) => {
            info!("课程资料 {} 已被 {} 删除", material.id, profile.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Lesson material deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "Lesson material not found",
        ))),
        Err(e) => Ok(error_response(&e, None)),
    }
}
