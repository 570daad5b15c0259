use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::middlewares::RequireTenant;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond_storage_error;

pub async fn get_question(
    service: &QuestionService,
    request: &HttpRequest,
    assessment_id: i64,
    question_id: i64,
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
        .get_question(ctx.school_id, assessment_id, question_id)
        .await
    {
        Ok(Some(question)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(question, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "题目不存在",
        ))),
        Err(e) => Ok(respond_storage_error(&e)),
    }
}
