//! HTTP 层端到端测试：组卷 → 发布 → 成绩发布的完整流程

mod common;

use std::sync::Arc;

use actix_web::{App, test, web};
use common::*;
use rust_assessment_engine::media::{FsMediaStore, MediaStore};
use rust_assessment_engine::routes;
use rust_assessment_engine::storage::Storage;
use serde_json::{Value, json};

fn test_media() -> Arc<dyn MediaStore> {
    let dir = std::env::temp_dir().join("assessment-engine-test-media");
    Arc::new(FsMediaStore::new(
        dir.to_string_lossy().to_string(),
        "/uploads",
    ))
}

macro_rules! test_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new(test_media()))
                .configure(routes::configure_assessment_routes)
                .configure(routes::configure_question_media_routes)
                .configure(routes::configure_participant_routes),
        )
        .await
    };
}

fn with_tenant(req: test::TestRequest) -> test::TestRequest {
    req.insert_header(("X-School-Id", "1"))
        .insert_header(("X-User-Id", "10"))
}

#[actix_web::test]
async fn test_full_assessment_flow() {
    let (storage, db) = setup().await;
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let app = test_app!(storage);

    // 创建测评
    let req = with_tenant(test::TestRequest::post().uri("/api/v1/assessments"))
        .set_json(json!({
            "subject_id": 100,
            "title": "期中数学测评",
            "passing_score": 60.0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "draft");
    assert_eq!(body["data"]["total_points"], 0.0);
    let assessment_id = body["data"]["id"].as_i64().unwrap();

    // 空测评不允许发布
    let req = with_tenant(test::TestRequest::post().uri(&format!(
        "/api/v1/assessments/{assessment_id}/publish"
    )))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    // 添加选择题，标准答案由选项标记派生
    let req = with_tenant(test::TestRequest::post().uri(&format!(
        "/api/v1/assessments/{assessment_id}/questions"
    )))
    .set_json(json!({
        "text": "2 + 2 = ?",
        "question_type": "single_choice",
        "points": 2.0,
        "options": [
            {"text": "3", "is_correct": false},
            {"text": "4", "is_correct": true}
        ]
    }))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let question = &body["data"];
    assert_eq!(question["sort_order"], 1);
    assert_eq!(question["options"].as_array().unwrap().len(), 2);
    let correct_id = question["options"]
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["is_correct"] == true)
        .unwrap()["id"]
        .as_i64()
        .unwrap();
    let answers = question["correct_answers"].as_array().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["option_ids"], json!([correct_id]));

    // 添加简答题
    let req = with_tenant(test::TestRequest::post().uri(&format!(
        "/api/v1/assessments/{assessment_id}/questions"
    )))
    .set_json(json!({
        "text": "请简述勾股定理",
        "question_type": "short_answer",
        "points": 3.5
    }))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    // 总分跟随题目变化
    let req = with_tenant(
        test::TestRequest::get().uri(&format!("/api/v1/assessments/{assessment_id}")),
    )
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_points"], 5.5);

    // 发布
    let req = with_tenant(test::TestRequest::post().uri(&format!(
        "/api/v1/assessments/{assessment_id}/publish"
    )))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["is_published"], true);

    // 答题记录由答题运行时写入，这里直接落库
    seed_attempt(
        &db,
        assessment_id,
        501,
        1,
        "graded",
        Some(5.5),
        Some(100.0),
        Some(true),
        Some(1_700_000_200),
        Some(120),
    )
    .await;

    // 发布成绩，两次调用结果一致
    let uri = format!("/api/v1/assessments/{assessment_id}/release-results");
    let req = with_tenant(test::TestRequest::post().uri(&uri)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "closed");
    assert_eq!(body["data"]["is_result_released"], true);
    let released_at = body["data"]["result_released_at"].clone();

    let req = with_tenant(test::TestRequest::post().uri(&uri)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["result_released_at"], released_at);

    // 关闭后内容被锁定
    let req = with_tenant(test::TestRequest::post().uri(&format!(
        "/api/v1/assessments/{assessment_id}/questions"
    )))
    .set_json(json!({
        "text": "迟到的题",
        "question_type": "short_answer",
        "points": 1.0
    }))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    // 有答题记录的测评不可删除
    let req = with_tenant(
        test::TestRequest::delete().uri(&format!("/api/v1/assessments/{assessment_id}")),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn test_missing_tenant_headers_rejected() {
    let (storage, _db) = setup().await;
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let app = test_app!(storage);

    let req = test::TestRequest::get()
        .uri("/api/v1/assessments")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // 非法的租户头同样拒绝
    let req = test::TestRequest::get()
        .uri("/api/v1/assessments")
        .insert_header(("X-School-Id", "abc"))
        .insert_header(("X-User-Id", "10"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_invalid_path_id_rejected() {
    let (storage, _db) = setup().await;
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let app = test_app!(storage);

    let req = with_tenant(test::TestRequest::get().uri("/api/v1/assessments/not-a-number"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = with_tenant(test::TestRequest::get().uri("/api/v1/assessments/-3")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_not_found_and_validation_responses() {
    let (storage, _db) = setup().await;
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let app = test_app!(storage);

    // 不存在的测评
    let req = with_tenant(test::TestRequest::get().uri("/api/v1/assessments/424242")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // 空标题
    let req = with_tenant(test::TestRequest::post().uri("/api/v1/assessments"))
        .set_json(json!({"subject_id": 100, "title": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // 非法题型由反序列化层拒绝
    let assessment = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("校验用测评"))
        .await
        .unwrap();
    let req = with_tenant(test::TestRequest::post().uri(&format!(
        "/api/v1/assessments/{}/questions",
        assessment.id
    )))
    .set_json(json!({"text": "题", "question_type": "essay", "points": 1.0}))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_list_assessments_via_http() {
    let (storage, _db) = setup().await;
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let app = test_app!(storage);

    for i in 1..=3 {
        storage
            .create_assessment(SCHOOL, TEACHER, assessment_req(&format!("测评{i}")))
            .await
            .unwrap();
    }

    // 查询参数中的分页字段要传到存储层
    let req = with_tenant(test::TestRequest::get().uri("/api/v1/assessments?page=2&size=2"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    let data = &body["data"];
    assert_eq!(data["pagination"]["page"], 2);
    assert_eq!(data["pagination"]["page_size"], 2);
    assert_eq!(data["pagination"]["total"], 3);
    assert_eq!(data["items"].as_array().unwrap().len(), 1);

    // 不带参数时用默认分页
    let req = with_tenant(test::TestRequest::get().uri("/api/v1/assessments")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["page"], 1);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_delete_question_via_http() {
    let (storage, _db) = setup().await;
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let app = test_app!(storage);

    let assessment = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("删题测评"))
        .await
        .unwrap();
    let q = storage
        .add_question(
            SCHOOL,
            assessment.id,
            question_req("要删的题", rust_assessment_engine::models::questions::entities::QuestionType::ShortAnswer, 1.0),
        )
        .await
        .unwrap();

    let req = with_tenant(test::TestRequest::delete().uri(&format!(
        "/api/v1/assessments/{}/questions/{}",
        assessment.id, q.question.id
    )))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // 已删除
    let req = with_tenant(test::TestRequest::get().uri(&format!(
        "/api/v1/assessments/{}/questions/{}",
        assessment.id, q.question.id
    )))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
