use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::{ObjectService, files};
use crate::access::ObjectAction;
use crate::errors::AppError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn handle_download(
    service: &ObjectService,
    request: &HttpRequest,
    bucket_id: String,
    raw_path: String,
) -> ActixResult<HttpResponse> {
    let target = match service
        .authorize(request, &bucket_id, &raw_path, ObjectAction::Read)
        .await
    {
        Ok(t) => t,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let object = match storage
        .get_object(target.bucket.id(), &target.path.as_key())
        .await
    {
        Ok(Some(object)) => object,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "Object not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, None)),
    };

    let data = match files::read_object(target.bucket, &target.path).await {
        Ok(data) => data,
        Err(e @ AppError::NotFound(_)) => {
            return Ok(error_response(&e, Some(ErrorCode::FileNotFound)));
        }
        Err(e) => return Ok(error_response(&e, None)),
    };

    let cache_control = if target.bucket.is_public() {
        "public, max-age=300"
    } else {
        "private, no-store"
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, object.content_type))
        .insert_header((header::CACHE_CONTROL, cache_control))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", target.path.file_name()),
        ))
        .body(data))
}
