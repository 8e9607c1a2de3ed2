use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT};
use crate::models::courses::requests::ViewerQuery;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::services::ViewerService;

// 懒加载的全局 ViewerService 实例
static VIEWER_SERVICE: Lazy<ViewerService> = Lazy::new(ViewerService::new_lazy);

// 课程作业概览
pub async fn get_overview(
    req: HttpRequest,
    query: web::Query<ViewerQuery>,
) -> ActixResult<HttpResponse> {
    VIEWER_SERVICE.overview(&req, query.into_inner()).await
}

// 提交作业
pub async fn submit_assignment(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    VIEWER_SERVICE.submit(&req, body.into_inner()).await
}

// 查看批改反馈
pub async fn get_feedback(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    VIEWER_SERVICE.feedback(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_viewer_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/viewer")
            .service(
                web::resource("/submissions")
                    .wrap(RateLimit::submission())
                    .wrap(RequireJWT::required())
                    .route(web::post().to(submit_assignment)),
            )
            .service(
                web::resource("")
                    .wrap(RequireJWT::required())
                    .route(web::get().to(get_overview)),
            )
            .service(
                web::resource("/assignments/{assignment_id}/feedback")
                    .wrap(RequireJWT::required())
                    .route(web::get().to(get_feedback)),
            ),
    );
}
