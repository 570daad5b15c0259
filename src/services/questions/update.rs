use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuestionService;
use crate::middlewares::RequireTenant;
use crate::models::questions::requests::UpdateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond_storage_error;

pub async fn update_question(
    service: &QuestionService,
    request: &HttpRequest,
    assessment_id: i64,
    question_id: i64,
    req: UpdateQuestionRequest,
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

    if let Some(ref text) = req.text
        && text.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "题干不能为空",
        )));
    }

    let storage = service.get_storage(request);
    match storage
        .update_question(ctx.school_id, assessment_id, question_id, req)
        .await
    {
        Ok(question) => {
            info!(
                "Question {} of assessment {} updated by user {}",
                question_id, assessment_id, ctx.user_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(question, "题目更新成功")))
        }
        Err(e) => Ok(respond_storage_error(&e)),
    }
}
