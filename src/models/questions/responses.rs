use serde::{Deserialize, Serialize};

use crate::models::questions::entities::{CorrectAnswer, Question, QuestionOption};

/// 题目详情（带子表）
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionWithChildren {
    #[serde(flatten)]
    pub question: Question,
    pub options: Vec<QuestionOption>,
    pub correct_answers: Vec<CorrectAnswer>,
}

/// 题目列表项（带作答数）
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionListItem {
    #[serde(flatten)]
    pub question: Question,
    pub options: Vec<QuestionOption>,
    pub correct_answers: Vec<CorrectAnswer>,
    pub response_count: i64,
}

/// 题目列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub items: Vec<QuestionListItem>,
    pub total: i64,
}

/// 题图上传响应：先上传拿到引用，再随题目创建/更新持久化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaUploadResponse {
    pub url: String,
    pub key: String,
}
