use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT};
use crate::services::ObjectService;

// 懒加载的全局 ObjectService 实例
static OBJECT_SERVICE: Lazy<ObjectService> = Lazy::new(ObjectService::new_lazy);

pub async fn download_object(
    request: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (bucket, name) = path.into_inner();
    OBJECT_SERVICE.download(&request, bucket, name).await
}

pub async fn upload_object(
    request: HttpRequest,
    path: web::Path<(String, String)>,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    let (bucket, name) = path.into_inner();
    OBJECT_SERVICE.upload(&request, bucket, name, payload).await
}

pub async fn delete_object(
    request: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (bucket, name) = path.into_inner();
    OBJECT_SERVICE.delete(&request, bucket, name).await
}

// 配置路由
pub fn configure_object_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/storage/{bucket}/object/{path:.*}")
            .route(
                web::get()
                    .to(download_object)
                    .wrap(RequireJWT::optional()),
            )
            .route(
                web::post()
                    .to(upload_object)
                    .wrap(RateLimit::object_upload())
                    .wrap(RequireJWT::required()),
            )
            .route(
                web::delete()
                    .to(delete_object)
                    .wrap(RequireJWT::required()),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    async fn app_storage() -> Arc<dyn Storage> {
        Arc::new(memory_storage().await)
    }

    #[actix_web::test]
    async fn test_unknown_bucket_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_storage().await))
                .configure(configure_object_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/storage/avatars/object/a.png")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_private_bucket_read_requires_identity() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_storage().await))
                .configure(configure_object_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/storage/assignments/object/submissions/s1/hw.pdf")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_public_bucket_missing_object() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_storage().await))
                .configure(configure_object_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/storage/lesson-materials/object/c1/slides.pdf")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    fn bearer(profile_id: &str, role: &str) -> (&'static str, String) {
        let token = crate::utils::jwt::JwtUtils::generate_access_token(profile_id, role).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    fn multipart_file(file_name: &str, content: &str) -> (String, String) {
        let boundary = "object-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        );
        (format!("multipart/form-data; boundary={boundary}"), body)
    }

    #[actix_web::test]
    async fn test_upload_download_delete_keep_file_and_metadata_together() {
        use crate::models::profiles::entities::ProfileRole;
        use crate::storage::sea_orm_storage::test_support::{seed_course, seed_profile};

        let sea = memory_storage().await;
        seed_profile(&sea, "t1", ProfileRole::Tutor).await;
        seed_profile(&sea, "s1", ProfileRole::Student).await;
        let course = seed_course(&sea, "Rust 101", Some("t1")).await;
        let storage: Arc<dyn Storage> = Arc::new(sea);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_object_routes),
        )
        .await;
        let uri = format!("/api/v1/storage/lesson-materials/object/{}/notes.txt", course.id);

        // 学生不能写入课程资料桶
        let (content_type, body) = multipart_file("notes.txt", "hello");
        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(bearer("s1", "student"))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let (content_type, body) = multipart_file("notes.txt", "hello");
        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(bearer("t1", "tutor"))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let object = storage
            .get_object("lesson-materials", &format!("{}/notes.txt", course.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(object.size, 5);
        assert_eq!(object.owner_id.as_deref(), Some("t1"));

        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "hello");

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer("t1", "tutor"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        assert!(
            storage
                .get_object("lesson-materials", &format!("{}/notes.txt", course.id))
                .await
                .unwrap()
                .is_none()
        );
        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer("t1", "tutor"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let dir = std::path::Path::new(&crate::config::AppConfig::get().upload.dir)
            .join("lesson-materials")
            .join(&course.id);
        let _ = std::fs::remove_dir_all(dir);
    }
}
