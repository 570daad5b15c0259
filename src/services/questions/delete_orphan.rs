use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuestionService;
use crate::middlewares::RequireTenant;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond_storage_error;

/// 清理孤儿题图
///
/// 上传成功但题目持久化失败时的补偿接口：按 key 删除 blob。
/// key 不存在视为成功，重复调用是 no-op。
pub async fn delete_orphaned_image(
    service: &QuestionService,
    request: &HttpRequest,
    key: String,
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

    let media = service.get_media(request);
    match media.delete(&key).await {
        Ok(()) => {
            info!("Orphaned image {} removed by user {}", key, ctx.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("孤儿图片已清理")))
        }
        Err(e) => Ok(respond_storage_error(&e)),
    }
}
