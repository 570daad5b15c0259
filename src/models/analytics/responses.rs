use serde::{Deserialize, Serialize};

/// 单个测评的统计视图
#[derive(Debug, Serialize, Deserialize)]
pub struct AssessmentAnalyticsResponse {
    pub assessment_id: i64,
    pub total_attempts: i64,
    pub submitted_attempts: i64,
    pub distinct_participants: i64,
    /// 已提交记录的平均百分比，无提交时为 0
    pub average_percentage: f64,
    /// 通过数 / 提交数 × 100，无提交时为 0
    pub pass_rate: f64,
    /// 平均用时，HH:MM:SS
    pub average_time_spent: String,
    /// 按参与者分组，最近提交在前
    pub participants: Vec<ParticipantSummary>,
}

/// 一名参与者在某测评内的汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub participant_id: i64,
    pub total_attempts: i64,
    pub submitted_attempts: i64,
    /// 已提交记录中的最高分
    pub best_score: Option<f64>,
    pub best_percentage: Option<f64>,
    /// 已提交记录的平均分
    pub average_score: f64,
    pub passed_count: i64,
    pub last_submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 一名参与者的跨测评答题历史
#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipantHistoryResponse {
    pub participant_id: i64,
    pub total_attempts: i64,
    pub submitted_attempts: i64,
    pub average_percentage: f64,
    pub pass_rate: f64,
    pub average_time_spent: String,
    /// 按测评分组，最近提交在前
    pub assessments: Vec<AssessmentHistoryItem>,
}

/// 参与者在单个测评上的历史汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentHistoryItem {
    pub assessment_id: i64,
    pub title: Option<String>,
    pub total_attempts: i64,
    pub submitted_attempts: i64,
    pub best_score: Option<f64>,
    pub best_percentage: Option<f64>,
    pub average_score: f64,
    pub passed_count: i64,
    pub last_submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}
