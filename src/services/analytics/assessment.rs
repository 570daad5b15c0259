use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnalyticsService, group_preserving_order, overall_stats, summarize_group};
use crate::middlewares::RequireTenant;
use crate::models::analytics::responses::{AssessmentAnalyticsResponse, ParticipantSummary};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::respond_storage_error;

pub async fn get_assessment_analytics(
    service: &AnalyticsService,
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
    let attempts = match storage
        .list_attempts_by_assessment(ctx.school_id, assessment_id)
        .await
    {
        Ok(attempts) => attempts,
        Err(e) => return Ok(respond_storage_error(&e)),
    };

    let overall = overall_stats(&attempts);
    let groups = group_preserving_order(&attempts, |a| a.participant_id);

    let participants: Vec<ParticipantSummary> = groups
        .iter()
        .map(|(participant_id, members)| {
            let stats = summarize_group(members);
            ParticipantSummary {
                participant_id: *participant_id,
                total_attempts: stats.total_attempts,
                submitted_attempts: stats.submitted_attempts,
                best_score: stats.best_score,
                best_percentage: stats.best_percentage,
                average_score: stats.average_score,
                passed_count: stats.passed_count,
                last_submitted_at: stats.last_submitted_at,
            }
        })
        .collect();

    let response = AssessmentAnalyticsResponse {
        assessment_id,
        total_attempts: overall.total_attempts,
        submitted_attempts: overall.submitted_attempts,
        distinct_participants: participants.len() as i64,
        average_percentage: overall.average_percentage,
        pass_rate: overall.pass_rate,
        average_time_spent: overall.average_time_spent,
        participants,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
