/*!
 * 租户上下文中间件
 *
 * 引擎部署在网关之后，认证与租户解析由上游完成，结果通过
 * `X-School-Id` 和 `X-User-Id` 请求头传入。此中间件校验两个头
 * 都存在且为正整数，并将租户上下文存入请求扩展。
 *
 * ## 使用方法
 *
 * 1. 在路由上应用中间件：
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireTenant;
 *
 * App::new().service(
 *     web::scope("/api/v1/assessments")
 *         .wrap(RequireTenant)
 *         .route("", web::get().to(list_assessments)),
 * )
 * ```
 *
 * 2. 在处理程序中提取租户信息：
 * ```rust,ignore
 * if let Some(ctx) = RequireTenant::extract_tenant(&req) {
 *     println!("school={} user={}", ctx.school_id, ctx.user_id);
 * }
 * ```
 *
 * 头缺失或非法时返回 401，请求不会到达业务层。
 */

use crate::models::{ApiResponse, ErrorCode};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

const SCHOOL_ID_HEADER: &str = "X-School-Id";
const USER_ID_HEADER: &str = "X-User-Id";

/// 上游网关解析出的租户上下文
#[derive(Debug, Clone, Copy)]
pub struct TenantContext {
    pub school_id: i64,
    pub user_id: i64,
}

#[derive(Clone)]
pub struct RequireTenant;

// 辅助函数：创建错误响应
fn create_error_response(status: StatusCode, message: &str) -> HttpResponse {
    match status {
        StatusCode::NO_CONTENT => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
            .finish(),
        _ => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ApiResponse::<()>::error_empty(
                ErrorCode::Unauthorized,
                message,
            )),
    }
}

// 辅助函数：从请求头解析租户上下文
fn extract_tenant_headers(req: &ServiceRequest) -> Result<TenantContext, String> {
    let parse_header = |name: &str| -> Result<i64, String> {
        req.headers()
            .get(name)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|id| *id > 0)
            .ok_or_else(|| format!("Missing or invalid {name} header"))
    };

    Ok(TenantContext {
        school_id: parse_header(SCHOOL_ID_HEADER)?,
        user_id: parse_header(USER_ID_HEADER)?,
    })
}

impl<S, B> Transform<S, ServiceRequest> for RequireTenant
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireTenantMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireTenantMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireTenantMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireTenantMiddleware<S>
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
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, "").map_into_right_body(),
                ));
            }

            match extract_tenant_headers(&req) {
                Ok(ctx) => {
                    debug!(
                        "Tenant context resolved: school={} user={}",
                        ctx.school_id, ctx.user_id
                    );
                    req.extensions_mut().insert(ctx);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "Tenant resolution failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取租户信息
impl RequireTenant {
    /// 从请求扩展中提取租户上下文
    /// 此函数应该在应用了 RequireTenant 中间件的路由处理程序中使用
    pub fn extract_tenant(req: &actix_web::HttpRequest) -> Option<TenantContext> {
        req.extensions().get::<TenantContext>().copied()
    }

    /// 从请求扩展中提取学校 ID
    pub fn extract_school_id(req: &actix_web::HttpRequest) -> Option<i64> {
        Self::extract_tenant(req).map(|ctx| ctx.school_id)
    }

    /// 从请求扩展中提取用户 ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        Self::extract_tenant(req).map(|ctx| ctx.user_id)
    }
}
