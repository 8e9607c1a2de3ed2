use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT};
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::services::GradingService;

// 懒加载的全局 GradingService 实例
static GRADING_SERVICE: Lazy<GradingService> = Lazy::new(GradingService::new_lazy);

// 批改提交
pub async fn grade_submission(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .grade_submission(&req, path.into_inner(), body.into_inner())
        .await
}

// 配置路由
pub fn configure_grading_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/submissions/{id}/grade")
            .wrap(RateLimit::grading())
            .wrap(RequireJWT::required())
            .route(web::put().to(grade_submission)),
    );
}
