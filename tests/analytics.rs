//! 统计聚合测试：测评统计视图、参与者历史与答题记录排序

mod common;

use std::sync::Arc;

use actix_web::{App, test, web};
use common::*;
use rust_assessment_engine::models::questions::entities::QuestionType;
use rust_assessment_engine::routes;
use rust_assessment_engine::storage::Storage;
use serde_json::Value;

fn with_tenant(req: test::TestRequest) -> test::TestRequest {
    req.insert_header(("X-School-Id", "1"))
        .insert_header(("X-User-Id", "10"))
}

#[tokio::test]
async fn test_attempt_listing_order() {
    let (storage, db) = setup().await;
    let assessment = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("排序校验"))
        .await
        .unwrap();

    // 乱序写入：晚提交、早提交、未提交
    seed_attempt(
        &db,
        assessment.id,
        11,
        1,
        "submitted",
        Some(5.0),
        Some(50.0),
        Some(false),
        Some(1_700_000_100),
        Some(60),
    )
    .await;
    seed_attempt(
        &db,
        assessment.id,
        12,
        1,
        "graded",
        Some(9.0),
        Some(90.0),
        Some(true),
        Some(1_700_000_900),
        Some(90),
    )
    .await;
    seed_attempt(
        &db,
        assessment.id,
        13,
        1,
        "in_progress",
        None,
        None,
        None,
        None,
        None,
    )
    .await;

    let attempts = storage
        .list_attempts_by_assessment(SCHOOL, assessment.id)
        .await
        .unwrap();
    // 提交时间倒序，未提交的排在最后
    assert_eq!(attempts.len(), 3);
    assert_eq!(attempts[0].participant_id, 12);
    assert_eq!(attempts[1].participant_id, 11);
    assert_eq!(attempts[2].participant_id, 13);
    assert!(attempts[2].submitted_at.is_none());

    // 其他租户看不到
    let err = storage
        .list_attempts_by_assessment(OTHER_SCHOOL, assessment.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        rust_assessment_engine::errors::AssessmentError::NotFound(_)
    ));
}

#[actix_web::test]
async fn test_assessment_analytics_endpoint() {
    let (storage, db) = setup().await;
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .configure(routes::configure_assessment_routes),
    )
    .await;

    let assessment = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("统计测评"))
        .await
        .unwrap();
    storage
        .add_question(
            SCHOOL,
            assessment.id,
            question_req("题", QuestionType::ShortAnswer, 10.0),
        )
        .await
        .unwrap();

    // 参与者 21：两次提交；参与者 22：一次进行中
    seed_attempt(
        &db,
        assessment.id,
        21,
        1,
        "graded",
        Some(8.0),
        Some(80.0),
        Some(true),
        Some(1_700_000_100),
        Some(600),
    )
    .await;
    seed_attempt(
        &db,
        assessment.id,
        21,
        2,
        "submitted",
        Some(4.0),
        Some(40.0),
        Some(false),
        Some(1_700_000_500),
        Some(1200),
    )
    .await;
    seed_attempt(
        &db, assessment.id, 22, 1, "in_progress", None, None, None, None, None,
    )
    .await;

    let req = with_tenant(test::TestRequest::get().uri(&format!(
        "/api/v1/assessments/{}/analytics",
        assessment.id
    )))
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    let data = &body["data"];
    assert_eq!(data["assessment_id"], assessment.id);
    assert_eq!(data["total_attempts"], 3);
    assert_eq!(data["submitted_attempts"], 2);
    assert_eq!(data["distinct_participants"], 2);
    assert_eq!(data["average_percentage"], 60.0);
    assert_eq!(data["pass_rate"], 50.0);
    assert_eq!(data["average_time_spent"], "00:15:00");

    let participants = data["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 2);
    // 最近提交在前；未提交的参与者排在最后
    assert_eq!(participants[0]["participant_id"], 21);
    assert_eq!(participants[0]["total_attempts"], 2);
    assert_eq!(participants[0]["best_score"], 8.0);
    assert_eq!(participants[0]["average_score"], 6.0);
    assert_eq!(participants[0]["passed_count"], 1);
    assert_eq!(participants[1]["participant_id"], 22);
    assert_eq!(participants[1]["submitted_attempts"], 0);
    assert!(participants[1]["best_score"].is_null());

    // 不存在的测评
    let req = with_tenant(
        test::TestRequest::get().uri("/api/v1/assessments/424242/analytics"),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_participant_history_endpoint() {
    let (storage, db) = setup().await;
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .configure(routes::configure_participant_routes),
    )
    .await;

    let math = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("数学测评"))
        .await
        .unwrap();
    let physics = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("物理测评"))
        .await
        .unwrap();

    // 参与者 31 在两个测评各有记录，物理的提交更晚
    seed_attempt(
        &db,
        math.id,
        31,
        1,
        "graded",
        Some(7.0),
        Some(70.0),
        Some(true),
        Some(1_700_000_100),
        Some(300),
    )
    .await;
    seed_attempt(
        &db,
        physics.id,
        31,
        1,
        "submitted",
        Some(5.0),
        Some(50.0),
        Some(false),
        Some(1_700_000_800),
        Some(500),
    )
    .await;
    // 另一参与者的记录不掺入
    seed_attempt(
        &db,
        math.id,
        32,
        1,
        "submitted",
        Some(10.0),
        Some(100.0),
        Some(true),
        Some(1_700_000_900),
        Some(100),
    )
    .await;

    let req = with_tenant(test::TestRequest::get().uri("/api/v1/participants/31/history"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    let data = &body["data"];
    assert_eq!(data["participant_id"], 31);
    assert_eq!(data["total_attempts"], 2);
    assert_eq!(data["submitted_attempts"], 2);
    assert_eq!(data["average_percentage"], 60.0);
    assert_eq!(data["pass_rate"], 50.0);

    let assessments = data["assessments"].as_array().unwrap();
    assert_eq!(assessments.len(), 2);
    // 最近提交的测评在前，并带标题
    assert_eq!(assessments[0]["assessment_id"], physics.id);
    assert_eq!(assessments[0]["title"], "物理测评");
    assert_eq!(assessments[1]["assessment_id"], math.id);
    assert_eq!(assessments[1]["title"], "数学测评");
    assert_eq!(assessments[1]["best_score"], 7.0);

    // 没有记录的参与者返回空历史
    let req = with_tenant(test::TestRequest::get().uri("/api/v1/participants/999/history"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_attempts"], 0);
    assert!(body["data"]["assessments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_participant_history_tenant_scope() {
    let (storage, db) = setup().await;
    let mine = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("本校测评"))
        .await
        .unwrap();
    let theirs = storage
        .create_assessment(OTHER_SCHOOL, TEACHER, assessment_req("他校测评"))
        .await
        .unwrap();

    seed_attempt(
        &db,
        mine.id,
        41,
        1,
        "submitted",
        Some(6.0),
        Some(60.0),
        Some(true),
        Some(1_700_000_100),
        Some(60),
    )
    .await;
    seed_attempt(
        &db,
        theirs.id,
        41,
        1,
        "submitted",
        Some(9.0),
        Some(90.0),
        Some(true),
        Some(1_700_000_200),
        Some(60),
    )
    .await;

    // 同一参与者跨租户的记录互不可见
    let attempts = storage
        .list_attempts_by_participant(SCHOOL, 41)
        .await
        .unwrap();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].assessment_id, mine.id);

    let attempts = storage
        .list_attempts_by_participant(OTHER_SCHOOL, 41)
        .await
        .unwrap();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].assessment_id, theirs.id);
}
