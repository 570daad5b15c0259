//! 生命周期控制器存储层测试：发布守卫、撤回、成绩发布幂等与删除保护

mod common;

use common::*;
use rust_assessment_engine::errors::AssessmentError;
use rust_assessment_engine::models::assessments::entities::AssessmentStatus;
use rust_assessment_engine::models::questions::entities::QuestionType;
use rust_assessment_engine::storage::Storage;

#[tokio::test]
async fn test_publish_requires_questions() {
    let (storage, _db) = setup().await;
    let assessment = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("空测评"))
        .await
        .unwrap();
    assert_eq!(assessment.status, AssessmentStatus::Draft);

    let err = storage
        .publish_assessment(SCHOOL, assessment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::MissingQuestions(_)));

    storage
        .add_question(
            SCHOOL,
            assessment.id,
            question_req("唯一的题", QuestionType::ShortAnswer, 1.0),
        )
        .await
        .unwrap();

    let published = storage
        .publish_assessment(SCHOOL, assessment.id)
        .await
        .unwrap();
    assert_eq!(published.status, AssessmentStatus::Active);
    assert!(published.is_published);
    assert!(published.published_at.is_some());
}

#[tokio::test]
async fn test_unpublish_retains_published_at() {
    let (storage, _db) = setup().await;
    let assessment = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("撤回测试"))
        .await
        .unwrap();
    storage
        .add_question(
            SCHOOL,
            assessment.id,
            question_req("题", QuestionType::ShortAnswer, 1.0),
        )
        .await
        .unwrap();

    let published = storage
        .publish_assessment(SCHOOL, assessment.id)
        .await
        .unwrap();
    let first_published_at = published.published_at.unwrap();

    let withdrawn = storage
        .unpublish_assessment(SCHOOL, assessment.id)
        .await
        .unwrap();
    assert_eq!(withdrawn.status, AssessmentStatus::Draft);
    assert!(!withdrawn.is_published);
    // 首次发布时间作为历史记录保留
    assert_eq!(withdrawn.published_at, Some(first_published_at));
}

#[tokio::test]
async fn test_release_results_is_idempotent_and_closes() {
    let (storage, _db) = setup().await;
    let assessment = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("成绩发布测试"))
        .await
        .unwrap();
    storage
        .add_question(
            SCHOOL,
            assessment.id,
            question_req("题", QuestionType::ShortAnswer, 1.0),
        )
        .await
        .unwrap();

    // 从 draft 直接发布成绩也会强制关闭
    let released = storage.release_results(SCHOOL, assessment.id).await.unwrap();
    assert_eq!(released.status, AssessmentStatus::Closed);
    assert!(released.is_result_released);
    let first_released_at = released.result_released_at.unwrap();

    // 第二次调用是无副作用的空操作
    let again = storage.release_results(SCHOOL, assessment.id).await.unwrap();
    assert_eq!(again.status, AssessmentStatus::Closed);
    assert_eq!(again.result_released_at, Some(first_released_at));
    assert_eq!(again.updated_at, released.updated_at);
}

#[tokio::test]
async fn test_delete_assessment_guard_and_cascade() {
    let (storage, db) = setup().await;

    // 有答题记录的测评拒绝删除
    let guarded = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("有记录的测评"))
        .await
        .unwrap();
    storage
        .add_question(
            SCHOOL,
            guarded.id,
            question_req("题", QuestionType::ShortAnswer, 1.0),
        )
        .await
        .unwrap();
    seed_attempt(
        &db,
        guarded.id,
        301,
        1,
        "submitted",
        Some(1.0),
        Some(100.0),
        Some(true),
        Some(1_700_000_100),
        Some(30),
    )
    .await;
    let err = storage.delete_assessment(SCHOOL, guarded.id).await.unwrap_err();
    assert!(matches!(err, AssessmentError::HasAttempts(_)));

    // 无记录的测评删除成功，题目随之级联
    let clean = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("干净的测评"))
        .await
        .unwrap();
    let mut req = question_req("带选项的题", QuestionType::SingleChoice, 1.0);
    req.options = Some(vec![option_spec("A", true)]);
    storage.add_question(SCHOOL, clean.id, req).await.unwrap();

    assert!(storage.delete_assessment(SCHOOL, clean.id).await.unwrap());
    assert!(
        storage
            .get_assessment_by_id(SCHOOL, clean.id)
            .await
            .unwrap()
            .is_none()
    );
    let err = storage.list_questions(SCHOOL, clean.id).await.unwrap_err();
    assert!(matches!(err, AssessmentError::NotFound(_)));

    // 删除不存在的 ID 返回 false
    assert!(!storage.delete_assessment(SCHOOL, 987_654).await.unwrap());
}

#[tokio::test]
async fn test_update_status_triggers_lifecycle_semantics() {
    let (storage, _db) = setup().await;
    let assessment = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("状态更新测试"))
        .await
        .unwrap();

    // 通过 update 把空测评改为 active 同样触发题目守卫
    let mut update = empty_assessment_update();
    update.status = Some(AssessmentStatus::Active);
    let err = storage
        .update_assessment(SCHOOL, assessment.id, update)
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::MissingQuestions(_)));

    storage
        .add_question(
            SCHOOL,
            assessment.id,
            question_req("题", QuestionType::ShortAnswer, 1.0),
        )
        .await
        .unwrap();

    let mut update = empty_assessment_update();
    update.status = Some(AssessmentStatus::Active);
    let updated = storage
        .update_assessment(SCHOOL, assessment.id, update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, AssessmentStatus::Active);
    assert!(updated.is_published);
    assert!(updated.published_at.is_some());

    // 改回 draft 等价于撤回发布
    let mut update = empty_assessment_update();
    update.status = Some(AssessmentStatus::Draft);
    let updated = storage
        .update_assessment(SCHOOL, assessment.id, update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, AssessmentStatus::Draft);
    assert!(!updated.is_published);
    assert!(updated.published_at.is_some());
}

#[tokio::test]
async fn test_update_scalar_fields() {
    let (storage, _db) = setup().await;
    let assessment = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("原标题"))
        .await
        .unwrap();

    let mut update = empty_assessment_update();
    update.title = Some("新标题".to_string());
    update.passing_score = Some(75.0);
    update.shuffle_questions = Some(true);
    let updated = storage
        .update_assessment(SCHOOL, assessment.id, update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "新标题");
    assert_eq!(updated.passing_score, Some(75.0));
    assert!(updated.shuffle_questions);
    // 未提供的字段保持不变
    assert_eq!(updated.subject_id, 100);
    assert_eq!(updated.status, AssessmentStatus::Draft);
}

#[tokio::test]
async fn test_tenant_isolation() {
    let (storage, _db) = setup().await;
    let assessment = storage
        .create_assessment(SCHOOL, TEACHER, assessment_req("租户测试"))
        .await
        .unwrap();
    storage
        .add_question(
            SCHOOL,
            assessment.id,
            question_req("题", QuestionType::ShortAnswer, 1.0),
        )
        .await
        .unwrap();

    // 另一租户看不到也改不动
    assert!(
        storage
            .get_assessment_by_id(OTHER_SCHOOL, assessment.id)
            .await
            .unwrap()
            .is_none()
    );
    let mut update = empty_assessment_update();
    update.title = Some("越权标题".to_string());
    assert!(
        storage
            .update_assessment(OTHER_SCHOOL, assessment.id, update)
            .await
            .unwrap()
            .is_none()
    );
    let err = storage
        .publish_assessment(OTHER_SCHOOL, assessment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::NotFound(_)));
    assert!(
        !storage
            .delete_assessment(OTHER_SCHOOL, assessment.id)
            .await
            .unwrap()
    );

    let err = storage
        .list_questions(OTHER_SCHOOL, assessment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::NotFound(_)));

    // 本租户一切如常
    assert!(
        storage
            .get_assessment_by_id(SCHOOL, assessment.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_list_assessments_filters_and_pagination() {
    let (storage, _db) = setup().await;
    for i in 1..=5 {
        let mut req = assessment_req(&format!("数学测验 {i}"));
        req.subject_id = 100;
        storage.create_assessment(SCHOOL, TEACHER, req).await.unwrap();
    }
    let mut req = assessment_req("语文期末");
    req.subject_id = 200;
    let chinese = storage.create_assessment(SCHOOL, TEACHER, req).await.unwrap();
    storage
        .add_question(
            SCHOOL,
            chinese.id,
            question_req("题", QuestionType::ShortAnswer, 1.0),
        )
        .await
        .unwrap();
    storage.publish_assessment(SCHOOL, chinese.id).await.unwrap();

    use rust_assessment_engine::models::assessments::requests::AssessmentListQuery;

    // 分页
    let page = storage
        .list_assessments_with_pagination(
            SCHOOL,
            AssessmentListQuery {
                page: Some(1),
                size: Some(4),
                subject_id: None,
                status: None,
                search: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 6);
    assert_eq!(page.items.len(), 4);

    // 科目过滤
    let filtered = storage
        .list_assessments_with_pagination(
            SCHOOL,
            AssessmentListQuery {
                page: None,
                size: None,
                subject_id: Some(200),
                status: None,
                search: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(filtered.pagination.total, 1);
    assert_eq!(filtered.items[0].assessment.title, "语文期末");
    assert_eq!(filtered.items[0].question_count, 1);

    // 状态过滤
    let active = storage
        .list_assessments_with_pagination(
            SCHOOL,
            AssessmentListQuery {
                page: None,
                size: None,
                subject_id: None,
                status: Some(AssessmentStatus::Active),
                search: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(active.pagination.total, 1);

    // 标题搜索
    let searched = storage
        .list_assessments_with_pagination(
            SCHOOL,
            AssessmentListQuery {
                page: None,
                size: None,
                subject_id: None,
                status: None,
                search: Some("期末".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(searched.pagination.total, 1);

    // 其他租户列表为空
    let other = storage
        .list_assessments_with_pagination(
            OTHER_SCHOOL,
            AssessmentListQuery {
                page: None,
                size: None,
                subject_id: None,
                status: None,
                search: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(other.pagination.total, 0);
}
