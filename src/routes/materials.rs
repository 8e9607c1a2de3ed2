use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireJWT;
use crate::models::materials::requests::CreateMaterialRequest;
use crate::services::MaterialService;

// 懒加载的全局 MaterialService 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

// 列出课程资料
pub async fn list_materials(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .list_materials(&req, path.into_inner())
        .await
}

// 新增课程资料
pub async fn create_material(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_material(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除课程资料
pub async fn delete_material(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .delete_material(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_materials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/courses/{course_id}/materials")
            .route(
                web::get()
                    .to(list_materials)
                    .wrap(RequireJWT::optional()),
            )
            .route(
                web::post()
                    .to(create_material)
                    .wrap(RequireJWT::required()),
            ),
    );

    cfg.service(
        web::resource("/api/v1/materials/{id}")
            .wrap(RequireJWT::required())
            .route(web::delete().to(delete_material)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profiles::entities::ProfileRole;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::{memory_storage, seed_course, seed_profile};
    use crate::utils::jwt::JwtUtils;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    fn bearer(profile_id: &str, role: &str) -> (&'static str, String) {
        let token = JwtUtils::generate_access_token(profile_id, role).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_materials_lifecycle_and_policy() {
        let sea = memory_storage().await;
        seed_profile(&sea, "s1", ProfileRole::Student).await;
        seed_profile(&sea, "t1", ProfileRole::Tutor).await;
        seed_profile(&sea, "t2", ProfileRole::Tutor).await;
        let course = seed_course(&sea, "Rust 101", Some("t1")).await;
        let storage: Arc<dyn Storage> = Arc::new(sea);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_materials_routes),
        )
        .await;
        let list_uri = format!("/api/v1/courses/{}/materials", course.id);
        let material = serde_json::json!({
            "title": "Week 1 slides",
            "object_path": format!("{}/week1/slides.pdf", course.id),
        });

        // 学生与其他课程导师不能新增
        for (who, role) in [("s1", "student"), ("t2", "tutor")] {
            let req = test::TestRequest::post()
                .uri(&list_uri)
                .insert_header(bearer(who, role))
                .set_json(&material)
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
        }

        // 未登录不能新增
        let req = test::TestRequest::post()
            .uri(&list_uri)
            .set_json(&material)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        // 路径必须以课程 ID 开头
        let req = test::TestRequest::post()
            .uri(&list_uri)
            .insert_header(bearer("t1", "tutor"))
            .set_json(serde_json::json!({
                "title": "Elsewhere",
                "object_path": "other-course/slides.pdf",
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&list_uri)
            .insert_header(bearer("t1", "tutor"))
            .set_json(&material)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: serde_json::Value = test::read_body_json(resp).await;
        let material_id = created["data"]["id"].as_str().unwrap().to_string();

        // 公开可读，无需令牌
        let req = test::TestRequest::get().uri(&list_uri).to_request();
        let listed: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
        assert_eq!(listed["data"][0]["title"], "Week 1 slides");

        let delete_uri = format!("/api/v1/materials/{material_id}");
        let req = test::TestRequest::delete()
            .uri(&delete_uri)
            .insert_header(bearer("t2", "tutor"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&delete_uri)
            .insert_header(bearer("t1", "tutor"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&delete_uri)
            .insert_header(bearer("t1", "tutor"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        assert!(storage.list_materials_by_course(&course.id).await.unwrap().is_empty());
    }
}
