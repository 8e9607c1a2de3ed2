use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ObjectService, files};
use crate::access::ObjectAction;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn handle_delete(
    service: &ObjectService,
    request: &HttpRequest,
    bucket_id: String,
    raw_path: String,
) -> ActixResult<HttpResponse> {
    let target = match service
        .authorize(request, &bucket_id, &raw_path, ObjectAction::Write)
        .await
    {
        Ok(t) => t,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let name = target.path.as_key();

    match storage.get_object(target.bucket.id(), &name).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "Object not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, None)),
    }

    // 先删内容再删元数据，内容删除失败时元数据保留，可重试
    if let Err(e) = files::remove_object(target.bucket, &target.path).await {
        return Ok(error_response(&e, None));
    }

    if let Err(e) = storage.delete_object(target.bucket.id(), &name).await {
        return Ok(error_response(&e, None));
    }

    info!("对象已删除: {}/{}", target.bucket.id(), name);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Object deleted")))
}
