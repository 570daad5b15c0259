//! 集成测试公共设施
//!
//! 存储跑在单连接的内存 SQLite 上（池连接数必须是 1，
//! 否则每个池连接各自拿到一个独立的空库）。

#![allow(dead_code)]

use migration::{Migrator, MigratorTrait};
use rust_assessment_engine::entity::{attempts, responses};
use rust_assessment_engine::models::assessments::requests::{
    CreateAssessmentRequest, UpdateAssessmentRequest,
};
use rust_assessment_engine::models::questions::entities::QuestionType;
use rust_assessment_engine::models::questions::requests::{
    CreateQuestionRequest, OptionSpec, UpdateQuestionRequest,
};
use rust_assessment_engine::storage::sea_orm_storage::SeaOrmStorage;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

pub const SCHOOL: i64 = 1;
pub const OTHER_SCHOOL: i64 = 2;
pub const TEACHER: i64 = 10;

pub async fn setup() -> (SeaOrmStorage, DatabaseConnection) {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("connect in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    (SeaOrmStorage::from_connection(db.clone()), db)
}

pub fn assessment_req(title: &str) -> CreateAssessmentRequest {
    CreateAssessmentRequest {
        subject_id: 100,
        topic_id: None,
        title: title.to_string(),
        description: None,
        instructions: None,
        assessment_type: None,
        grading_mode: None,
        starts_at: None,
        ends_at: None,
        attempt_limit: None,
        passing_score: Some(60.0),
        shuffle_questions: None,
        show_correct_answers: None,
    }
}

pub fn question_req(text: &str, question_type: QuestionType, points: f64) -> CreateQuestionRequest {
    CreateQuestionRequest {
        text: text.to_string(),
        question_type,
        sort_order: None,
        points,
        required: None,
        time_limit: None,
        image_url: None,
        image_key: None,
        hint: None,
        explanation: None,
        difficulty: None,
        min_length: None,
        max_length: None,
        min_value: None,
        max_value: None,
        options: None,
        correct_answers: None,
    }
}

pub fn empty_question_update() -> UpdateQuestionRequest {
    UpdateQuestionRequest {
        text: None,
        question_type: None,
        sort_order: None,
        points: None,
        required: None,
        time_limit: None,
        image_url: None,
        image_key: None,
        hint: None,
        explanation: None,
        difficulty: None,
        min_length: None,
        max_length: None,
        min_value: None,
        max_value: None,
        options: None,
        correct_answers: None,
    }
}

pub fn empty_assessment_update() -> UpdateAssessmentRequest {
    UpdateAssessmentRequest {
        topic_id: None,
        title: None,
        description: None,
        instructions: None,
        assessment_type: None,
        grading_mode: None,
        status: None,
        starts_at: None,
        ends_at: None,
        attempt_limit: None,
        passing_score: None,
        shuffle_questions: None,
        show_correct_answers: None,
    }
}

pub fn option_spec(text: &str, is_correct: bool) -> OptionSpec {
    OptionSpec {
        id: None,
        text: text.to_string(),
        sort_order: None,
        is_correct: Some(is_correct),
        image_url: None,
        image_key: None,
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn seed_attempt(
    db: &DatabaseConnection,
    assessment_id: i64,
    participant_id: i64,
    attempt_number: i32,
    status: &str,
    score: Option<f64>,
    percentage: Option<f64>,
    passed: Option<bool>,
    submitted_at: Option<i64>,
    time_spent: Option<i64>,
) -> i64 {
    attempts::ActiveModel {
        assessment_id: Set(assessment_id),
        participant_id: Set(participant_id),
        attempt_number: Set(attempt_number),
        status: Set(status.to_string()),
        score: Set(score),
        percentage: Set(percentage),
        passed: Set(passed),
        started_at: Set(submitted_at.unwrap_or(1_700_000_000) - time_spent.unwrap_or(0)),
        submitted_at: Set(submitted_at),
        time_spent: Set(time_spent),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed attempt")
    .id
}

pub async fn seed_response(db: &DatabaseConnection, attempt_id: i64, question_id: i64) -> i64 {
    responses::ActiveModel {
        attempt_id: Set(attempt_id),
        question_id: Set(question_id),
        answer: Set(Some("A".to_string())),
        score: Set(None),
        is_correct: Set(None),
        created_at: Set(1_700_000_000),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed response")
    .id
}
