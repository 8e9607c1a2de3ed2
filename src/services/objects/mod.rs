pub mod delete;
pub mod download;
pub mod files;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::access::{Bucket, ObjectAction, ObjectPath, can_access_object};
use crate::middlewares::RequireJWT;
use crate::models::profiles::entities::Profile;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ObjectService {
    storage: Option<Arc<dyn Storage>>,
}

/// 通过访问检查的对象请求
pub(crate) struct ObjectTarget {
    pub bucket: Bucket,
    pub path: ObjectPath,
    pub identity: Option<Profile>,
}

impl ObjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    /// 解析桶与路径并按桶策略求值
    pub(crate) async fn authorize(
        &self,
        request: &HttpRequest,
        bucket_id: &str,
        raw_path: &str,
        action: ObjectAction,
    ) -> Result<ObjectTarget, HttpResponse> {
        let storage = self.get_storage(request);

        let bucket = match (Bucket::from_id(bucket_id), storage.get_bucket(bucket_id).await) {
            (Some(bucket), Ok(Some(_))) => bucket,
            (_, Err(e)) => return Err(super::error_response(&e, None)),
            _ => {
                return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::BucketNotFound,
                    "Bucket not found",
                )));
            }
        };

        let path = ObjectPath::parse(raw_path).map_err(|msg| {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        })?;

        let identity = RequireJWT::extract_profile(request);

        // lesson-materials 的写权限取决于路径首段对应课程的导师
        let course = match path.course_id(bucket) {
            Some(course_id) => match storage.get_course_by_id(course_id).await {
                Ok(course) => course,
                Err(e) => return Err(super::error_response(&e, None)),
            },
            None => None,
        };

        if !can_access_object(bucket, action, &path, identity.as_ref(), course.as_ref()) {
            let resp = match identity {
                None => HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Authentication required",
                )),
                Some(_) => HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Access to this object is denied",
                )),
            };
            return Err(resp);
        }

        Ok(ObjectTarget {
            bucket,
            path,
            identity,
        })
    }

    // 上传对象
    pub async fn upload(
        &self,
        request: &HttpRequest,
        bucket_id: String,
        path: String,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, bucket_id, path, payload).await
    }

    // 下载对象
    pub async fn download(
        &self,
        request: &HttpRequest,
        bucket_id: String,
        path: String,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, bucket_id, path).await
    }

    // 删除对象
    pub async fn delete(
        &self,
        request: &HttpRequest,
        bucket_id: String,
        path: String,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete(self, request, bucket_id, path).await
    }
}
