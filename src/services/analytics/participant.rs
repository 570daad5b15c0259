use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::{AnalyticsService, group_preserving_order, overall_stats, summarize_group};
use crate::middlewares::RequireTenant;
use crate::models::analytics::responses::{AssessmentHistoryItem, ParticipantHistoryResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond_storage_error;

pub async fn get_participant_history(
    service: &AnalyticsService,
    request: &HttpRequest,
    participant_id: i64,
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
    let attempts = match storage
        .list_attempts_by_participant(ctx.school_id, participant_id)
        .await
    {
        Ok(attempts) => attempts,
        Err(e) => return Ok(respond_storage_error(&e)),
    };

    let overall = overall_stats(&attempts);
    let groups = group_preserving_order(&attempts, |a| a.assessment_id);

    // 每个测评补上标题；测评被删的记录保留，标题为空
    let mut assessments = Vec::with_capacity(groups.len());
    for (assessment_id, members) in &groups {
        let title = match storage
            .get_assessment_by_id(ctx.school_id, *assessment_id)
            .await
        {
            Ok(assessment) => assessment.map(|a| a.title),
            Err(e) => {
                warn!(
                    "Failed to resolve title for assessment {}: {}",
                    assessment_id, e
                );
                None
            }
        };

        let stats = summarize_group(members);
        assessments.push(AssessmentHistoryItem {
            assessment_id: *assessment_id,
            title,
            total_attempts: stats.total_attempts,
            submitted_attempts: stats.submitted_attempts,
            best_score: stats.best_score,
            best_percentage: stats.best_percentage,
            average_score: stats.average_score,
            passed_count: stats.passed_count,
            last_submitted_at: stats.last_submitted_at,
        });
    }

    let response = ParticipantHistoryResponse {
        participant_id,
        total_attempts: overall.total_attempts,
        submitted_attempts: overall.submitted_attempts,
        average_percentage: overall.average_percentage,
        pass_rate: overall.pass_rate,
        average_time_spent: overall.average_time_spent,
        assessments,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
