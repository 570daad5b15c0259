use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use crate::middlewares::RequireTenant;
use crate::models::assessments::requests::CreateAssessmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond_storage_error;

pub async fn create_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    req: CreateAssessmentRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match RequireTenant::extract_tenant(request) {
        Some(ctx) => ctx,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取租户信息",
            )));
        }
    };

    if req.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "标题不能为空",
        )));
    }

    let storage = service.get_storage(request);
    match storage
        .create_assessment(ctx.school_id, ctx.user_id, req)
        .await
    {
        Ok(assessment) => {
            info!(
                "Assessment {} created by user {} in school {}",
                assessment.id, ctx.user_id, ctx.school_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assessment, "测评创建成功")))
        }
        Err(e) => Ok(respond_storage_error(&e)),
    }
}
