use crate::models::assessments::entities::{AssessmentStatus, GradingMode};
use crate::models::common::pagination::PaginationQuery;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// 创建测评请求
#[derive(Debug, Deserialize)]
pub struct CreateAssessmentRequest {
    pub subject_id: i64,
    pub topic_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub assessment_type: Option<String>,
    pub grading_mode: Option<GradingMode>,
    pub starts_at: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub ends_at: Option<DateTime<Utc>>,
    pub attempt_limit: Option<i32>,
    pub passing_score: Option<f64>,
    pub shuffle_questions: Option<bool>,
    pub show_correct_answers: Option<bool>,
}

/// 更新测评请求
///
/// `status` 变更会触发生命周期语义：从非活跃状态改为 published/active
/// 等价于 publish()，改回 draft 等价于 unpublish()。
#[derive(Debug, Deserialize)]
pub struct UpdateAssessmentRequest {
    pub topic_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub assessment_type: Option<String>,
    pub grading_mode: Option<GradingMode>,
    pub status: Option<AssessmentStatus>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub attempt_limit: Option<i32>,
    pub passing_score: Option<f64>,
    pub shuffle_questions: Option<bool>,
    pub show_correct_answers: Option<bool>,
}

/// 测评列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub subject_id: Option<i64>,
    pub status: Option<AssessmentStatus>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct AssessmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub subject_id: Option<i64>,
    pub status: Option<AssessmentStatus>,
    pub search: Option<String>,
}
