use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use crate::middlewares::RequireTenant;
use crate::models::assessments::requests::UpdateAssessmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond_storage_error;

pub async fn update_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    assessment_id: i64,
    req: UpdateAssessmentRequest,
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

    if let Some(ref title) = req.title
        && title.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "标题不能为空",
        )));
    }

    let storage = service.get_storage(request);
    match storage
        .update_assessment(ctx.school_id, assessment_id, req)
        .await
    {
        Ok(Some(assessment)) => {
            info!(
                "Assessment {} updated by user {}",
                assessment_id, ctx.user_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(assessment, "测评更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "测评不存在",
        ))),
        Err(e) => Ok(respond_storage_error(&e)),
    }
}
