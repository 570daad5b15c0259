use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use crate::middlewares::RequireTenant;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond_storage_error;

pub async fn unpublish_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    assessment_id: i64,
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

    let storage = service.get_storage(request);
    match storage
        .unpublish_assessment(ctx.school_id, assessment_id)
        .await
    {
        Ok(assessment) => {
            info!(
                "Assessment {} unpublished by user {}",
                assessment_id, ctx.user_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(assessment, "测评已撤回为草稿")))
        }
        Err(e) => Ok(respond_storage_error(&e)),
    }
}
