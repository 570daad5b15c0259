use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assessments::requests::{
    AssessmentListParams, CreateAssessmentRequest, UpdateAssessmentRequest,
};
use crate::routes::{analytics, questions};
use crate::services::AssessmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssessmentService 实例
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

// 列出测评
pub async fn list_assessments(
    req: HttpRequest,
    query: web::Query<AssessmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_assessments(&req, query.into_inner())
        .await
}

// 创建测评
pub async fn create_assessment(
    req: HttpRequest,
    body: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .create_assessment(&req, body.into_inner())
        .await
}

// 获取测评详情
pub async fn get_assessment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_assessment(&req, path.0).await
}

// 更新测评
pub async fn update_assessment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_assessment(&req, path.0, body.into_inner())
        .await
}

// 删除测评
pub async fn delete_assessment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.delete_assessment(&req, path.0).await
}

// 发布测评
pub async fn publish_assessment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.publish_assessment(&req, path.0).await
}

// 撤回发布
pub async fn unpublish_assessment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.unpublish_assessment(&req, path.0).await
}

// 发布成绩
pub async fn release_results(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.release_results(&req, path.0).await
}

// 配置路由（测评 CRUD、生命周期、嵌套的题目与统计）
pub fn configure_assessment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assessments")
            .wrap(middlewares::RequireTenant)
            .service(
                web::resource("")
                    .route(web::get().to(list_assessments))
                    .route(web::post().to(create_assessment)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_assessment))
                    .route(web::put().to(update_assessment))
                    .route(web::delete().to(delete_assessment)),
            )
            .service(web::resource("/{id}/publish").route(web::post().to(publish_assessment)))
            .service(web::resource("/{id}/unpublish").route(web::post().to(unpublish_assessment)))
            .service(web::resource("/{id}/release-results").route(web::post().to(release_results)))
            .service(
                web::resource("/{id}/analytics")
                    .route(web::get().to(analytics::get_assessment_analytics)),
            )
            .service(
                web::resource("/{id}/questions")
                    .route(web::get().to(questions::list_questions))
                    .route(web::post().to(questions::add_question)),
            )
            .service(
                web::resource("/{id}/questions/{question_id}")
                    .route(web::get().to(questions::get_question))
                    .route(web::put().to(questions::update_question))
                    .route(web::delete().to(questions::delete_question)),
            )
            .service(
                web::resource("/{id}/questions/{question_id}/image")
                    .route(web::delete().to(questions::delete_question_image)),
            ),
    );
}
