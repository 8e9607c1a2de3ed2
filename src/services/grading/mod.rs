pub mod grade;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::storage::Storage;

pub struct GradingService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradingService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 批改提交
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: String,
        body: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::handle_grade_submission(self, request, submission_id, body).await
    }
}
