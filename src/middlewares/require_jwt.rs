/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <token>` 中的 access token，并以 token 的 `sub`
 * 从 profiles 表解析出当前身份，存入请求扩展供处理程序使用。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireJWT;
 *
 * web::scope("/api/v1/viewer")
 *     .wrap(RequireJWT::required())   // 必须登录
 *     .route("", web::get().to(handler));
 *
 * web::scope("/api/v1/courses")
 *     .wrap(RequireJWT::optional())   // 可匿名访问，携带 token 时解析身份
 *     .route("/{course_id}/materials", web::get().to(handler));
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_profile(&req)` 获取身份。
 *
 * ## 认证流程
 *
 * 1. 提取并验证 JWT（HS256，密钥来自 `jwt.secret`）
 * 2. 按 `sub` 查询 profiles，未找到视为未认证
 * 3. 必须模式下失败返回 401；可选模式下缺少 token 时匿名放行，token 无效仍返回 401
 */

use crate::models::ErrorCode;
use crate::models::profiles::entities::Profile;
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone, Copy)]
pub struct RequireJWT {
    optional: bool,
}

impl RequireJWT {
    /// 必须携带有效 token
    pub const fn required() -> Self {
        Self { optional: false }
    }

    /// 缺少 token 时匿名放行
    pub const fn optional() -> Self {
        Self { optional: true }
    }
}

enum AuthFailure {
    Missing,
    Invalid(String),
}

// 辅助函数：提取并验证 JWT access token，解析出用户资料
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Profile, AuthFailure> {
    let header = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .ok_or(AuthFailure::Missing)?;
    let token = header
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| AuthFailure::Invalid("Invalid Authorization header".to_string()))?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Invalid("Invalid JWT token".to_string())
    })?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            AuthFailure::Invalid("Authentication unavailable".to_string())
        })?;

    storage
        .get_profile_by_id(&claims.sub)
        .await
        .map_err(|e| {
            error!("Failed to retrieve profile {}: {}", claims.sub, e);
            AuthFailure::Invalid("Failed to retrieve profile".to_string())
        })?
        .ok_or_else(|| AuthFailure::Invalid("Profile not found".to_string()))
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
            optional: self.optional,
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
    optional: bool,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let optional = self.optional;
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            let err = match extract_and_validate_jwt(&req).await {
                Ok(profile) => {
                    debug!("JWT authentication successful for ID: {}", profile.id);
                    req.extensions_mut().insert(profile);
                    return Ok(srv.call(req).await?.map_into_left_body());
                }
                Err(AuthFailure::Missing) if optional => {
                    return Ok(srv.call(req).await?.map_into_left_body());
                }
                Err(AuthFailure::Missing) => "Missing Authorization header".to_string(),
                Err(AuthFailure::Invalid(err)) => err,
            };

            info!(
                "JWT authentication failed for request to {}: {}",
                req.path(),
                err
            );
            Ok(req.into_response(
                create_error_response(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    &format!("Unauthorized: {err}"),
                )
                .map_into_right_body(),
            ))
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取用户资料
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_profile(req: &actix_web::HttpRequest) -> Option<Profile> {
        req.extensions().get::<Profile>().cloned()
    }
}
