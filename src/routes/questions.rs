use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::questions::requests::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::services::QuestionService;
use crate::utils::{SafeIDI64, SafeQuestionIdI64};

// 懒加载的全局 QuestionService 实例
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

// 列出题目
pub async fn list_questions(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.list_questions(&req, path.0).await
}

// 添加题目
pub async fn add_question(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .add_question(&req, path.0, body.into_inner())
        .await
}

// 获取题目详情
pub async fn get_question(
    req: HttpRequest,
    assessment: SafeIDI64,
    question: SafeQuestionIdI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .get_question(&req, assessment.0, question.0)
        .await
}

// 更新题目
pub async fn update_question(
    req: HttpRequest,
    assessment: SafeIDI64,
    question: SafeQuestionIdI64,
    body: web::Json<UpdateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .update_question(&req, assessment.0, question.0, body.into_inner())
        .await
}

// 删除题目
pub async fn delete_question(
    req: HttpRequest,
    assessment: SafeIDI64,
    question: SafeQuestionIdI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .delete_question(&req, assessment.0, question.0)
        .await
}

// 删除题图
pub async fn delete_question_image(
    req: HttpRequest,
    assessment: SafeIDI64,
    question: SafeQuestionIdI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .delete_question_image(&req, assessment.0, question.0)
        .await
}

// 上传题图（先上传拿引用，再随题目持久化）
pub async fn upload_question_image(
    req: HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.upload_question_image(&req, payload).await
}

// 清理孤儿题图
pub async fn delete_orphaned_image(
    req: HttpRequest,
    key: web::Path<String>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .delete_orphaned_image(&req, key.into_inner())
        .await
}

// 配置路由（独立于测评的题图 blob 接口）
pub fn configure_question_media_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions/images")
            .wrap(middlewares::RequireTenant)
            .service(web::resource("").route(web::post().to(upload_question_image)))
            .service(web::resource("/{key}").route(web::delete().to(delete_orphaned_image))),
    );
}
