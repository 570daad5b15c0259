use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::middlewares::RequireTenant;
use crate::models::assessments::requests::{AssessmentListParams, AssessmentListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond_storage_error;

pub async fn list_assessments(
    service: &AssessmentService,
    request: &HttpRequest,
    query: AssessmentListParams,
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
    let list_query = AssessmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        subject_id: query.subject_id,
        status: query.status,
        search: query.search,
    };

    match storage
        .list_assessments_with_pagination(ctx.school_id, list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(respond_storage_error(&e)),
    }
}
