pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::materials::requests::CreateMaterialRequest;
use crate::storage::Storage;

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 列出课程资料
    pub async fn list_materials(
        &self,
        request: &HttpRequest,
        course_id: String,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_materials(self, request, course_id).await
    }

    // 创建课程资料
    pub async fn create_material(
        &self,
        request: &HttpRequest,
        course_id: String,
        body: CreateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_material(self, request, course_id, body).await
    }

    // 删除课程资料
    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        material_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_material(self, request, material_id).await
    }
}
