pub mod analytics;
pub mod assessments;
pub mod questions;

pub use analytics::AnalyticsService;
pub use assessments::AssessmentService;
pub use questions::QuestionService;

use actix_web::HttpResponse;

use crate::errors::AssessmentError;
use crate::models::{ApiResponse, ErrorCode};

/// 存储层的带类型错误统一映射为 HTTP 响应
///
/// 守卫类错误（锁定、有依赖、缺题目）都映射为 409，
/// 校验错误 400，未找到 404，其余一律 500。
pub(crate) fn respond_storage_error(e: &AssessmentError) -> HttpResponse {
    match e {
        AssessmentError::NotFound(_) => HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            e.message().to_string(),
        )),
        AssessmentError::Validation(_) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ValidationFailed, e.message().to_string()),
        ),
        AssessmentError::AssessmentLocked(_) => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::AssessmentLocked, e.message().to_string()),
        ),
        AssessmentError::HasResponses(_) => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::QuestionHasResponses, e.message().to_string()),
        ),
        AssessmentError::HasAttempts(_) => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::AssessmentHasAttempts, e.message().to_string()),
        ),
        AssessmentError::MissingQuestions(_) => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::MissingQuestions, e.message().to_string()),
        ),
        AssessmentError::Storage(_) => HttpResponse::InternalServerError().json(
            ApiResponse::error_empty(ErrorCode::MediaStorageFailed, e.message().to_string()),
        ),
        AssessmentError::FileOperation(_) => HttpResponse::InternalServerError().json(
            ApiResponse::error_empty(ErrorCode::FileUploadFailed, e.message().to_string()),
        ),
        _ => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            e.format_simple(),
        )),
    }
}
