use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use tracing::{error, info};

use super::{ObjectService, files};
use crate::access::ObjectAction;
use crate::config::AppConfig;
use crate::models::objects::entities::NewStorageObject;
use crate::models::objects::responses::ObjectUploadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::detect_content_type;

pub async fn handle_upload(
    service: &ObjectService,
    request: &HttpRequest,
    bucket_id: String,
    raw_path: String,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let target = match service
        .authorize(request, &bucket_id, &raw_path, ObjectAction::Write)
        .await
    {
        Ok(t) => t,
        Err(resp) => return Ok(resp),
    };

    let max_size = AppConfig::get().upload.max_size;
    let mut data: Option<Vec<u8>> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }
        if data.is_some() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }

        let mut buf = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if buf.len() + chunk.len() > max_size {
                return Ok(HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                )));
            }
            buf.extend_from_slice(&chunk);
        }
        data = Some(buf);
    }

    let Some(data) = data else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    };

    // 对象类型由路径扩展名决定，并校验内容
    let head = &data[..data.len().min(512)];
    let Some(content_type) = detect_content_type(target.path.file_name(), head) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "File type not allowed or content does not match extension",
        )));
    };

    // 内容先落到临时文件，元数据写入成功后才替换正式文件
    let staged = match files::stage_object(target.bucket, &target.path, &data).await {
        Ok(staged) => staged,
        Err(e) => {
            error!("{}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to store object",
                )),
            );
        }
    };

    let owner_id = target.identity.as_ref().map(|p| p.id.clone());
    let storage = service.get_storage(request);
    let object = match storage
        .put_object(NewStorageObject {
            bucket_id: target.bucket.id().to_string(),
            name: target.path.as_key(),
            owner_id: owner_id.clone(),
            size: data.len() as i64,
            content_type: content_type.to_string(),
        })
        .await
    {
        Ok(object) => object,
        Err(e) => {
            staged.discard().await;
            return Ok(error_response(&e, Some(ErrorCode::FileUploadFailed)));
        }
    };

    if let Err(e) = staged.commit().await {
        error!("对象 {}/{} 元数据已写入但内容替换失败: {}", object.bucket_id, object.name, e);
        return Ok(error_response(&e, Some(ErrorCode::FileUploadFailed)));
    }

    info!(
        "对象已上传: {}/{} ({} bytes, owner {:?})",
        object.bucket_id, object.name, object.size, owner_id
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ObjectUploadResponse {
            bucket_id: object.bucket_id,
            name: object.name,
            size: object.size,
            content_type: object.content_type,
            created_at: object.created_at,
        },
        "File uploaded successfully",
    )))
}
