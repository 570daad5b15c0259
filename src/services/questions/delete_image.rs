use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::QuestionService;
use crate::middlewares::RequireTenant;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond_storage_error;

/// 删除题图
///
/// 先清数据库行，再尽力删除 blob。blob 删除失败只记日志，
/// 行已经清掉，引用不会悬空。
pub async fn delete_question_image(
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
    let prior_key = match storage
        .clear_question_image(ctx.school_id, assessment_id, question_id)
        .await
    {
        Ok(key) => key,
        Err(e) => return Ok(respond_storage_error(&e)),
    };

    if let Some(key) = prior_key {
        let media = service.get_media(request);
        if let Err(e) = media.delete(&key).await {
            warn!("Failed to delete image blob {}: {}", key, e);
        }
    }

    info!(
        "Image cleared for question {} of assessment {} by user {}",
        question_id, assessment_id, ctx.user_id
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("题图已删除")))
}
