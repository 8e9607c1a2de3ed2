use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MaterialService;
use crate::access::{Bucket, ObjectPath, can_write_materials};
use crate::models::materials::requests::{CreateMaterialRequest, NewLessonMaterial};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::services::lookup::{load_course, require_profile};
use crate::utils::validate::validate_title;

pub async fn handle_create_material(
    service: &MaterialService,
    request: &HttpRequest,
    course_id: String,
    body: CreateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let profile = match require_profile(request) {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let course = match load_course(&storage, &course_id).await {
        Ok(c) => c,
        Err(resp) => return Ok(resp),
    };

    if !can_write_materials(Some(&profile), &course) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the course tutor or an admin can manage lesson materials",
        )));
    }

    if let Err(msg) = validate_title(&body.title) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    // 资料对象必须位于该课程的目录下
    let path = match ObjectPath::parse(&body.object_path) {
        Ok(p) if p.course_id(Bucket::LessonMaterials) == Some(course.id.as_str()) => p,
        Ok(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Object path must start with the course ID",
            )));
        }
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    let new = NewLessonMaterial {
        course_id: course.id.clone(),
        title: body.title.trim().to_string(),
        object_path: path.as_key(),
        uploaded_by: profile.id.clone(),
    };

    match storage.create_material(new).await {
        Ok(material) => {
            info!("课程 {} 新增资料 {} (by {})", course.id, material.id, profile.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                material,
                "Lesson material created",
            )))
        }
        Err(e) => Ok(error_response(&e, None)),
    }
}
