pub mod feedback;
pub mod guard;
pub mod overview;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::ViewerQuery;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::storage::Storage;

pub struct ViewerService {
    storage: Option<Arc<dyn Storage>>,
}

impl ViewerService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 课程作业展示树
    pub async fn overview(
        &self,
        request: &HttpRequest,
        query: ViewerQuery,
    ) -> ActixResult<HttpResponse> {
        overview::handle_overview(self, request, query).await
    }

    // 提交作业
    pub async fn submit(
        &self,
        request: &HttpRequest,
        body: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit(self, request, body).await
    }

    // 查看批改反馈
    pub async fn feedback(
        &self,
        request: &HttpRequest,
        assignment_id: String,
    ) -> ActixResult<HttpResponse> {
        feedback::handle_feedback(self, request, assignment_id).await
    }
}
