use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::AnalyticsService;
use crate::utils::{SafeIDI64, SafeParticipantIdI64};

// 懒加载的全局 AnalyticsService 实例
static ANALYTICS_SERVICE: Lazy<AnalyticsService> = Lazy::new(AnalyticsService::new_lazy);

// 单个测评的统计视图
pub async fn get_assessment_analytics(
    req: HttpRequest,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE
        .get_assessment_analytics(&req, path.0)
        .await
}

// 参与者跨测评答题历史
pub async fn get_participant_history(
    req: HttpRequest,
    path: SafeParticipantIdI64,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE
        .get_participant_history(&req, path.0)
        .await
}

// 配置路由（参与者维度的统计）
pub fn configure_participant_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/participants")
            .wrap(middlewares::RequireTenant)
            .service(
                web::resource("/{participant_id}/history")
                    .route(web::get().to(get_participant_history)),
            ),
    );
}
