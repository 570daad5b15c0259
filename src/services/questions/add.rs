use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuestionService;
use crate::middlewares::RequireTenant;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond_storage_error;

pub async fn add_question(
    service: &QuestionService,
    request: &HttpRequest,
    assessment_id: i64,
    req: CreateQuestionRequest,
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

    if req.text.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "题干不能为空",
        )));
    }

    let storage = service.get_storage(request);
    match storage
        .add_question(ctx.school_id, assessment_id, req)
        .await
    {
        Ok(question) => {
            info!(
                "Question {} added to assessment {} by user {}",
                question.question.id, assessment_id, ctx.user_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(question, "题目添加成功")))
        }
        Err(e) => Ok(respond_storage_error(&e)),
    }
}
