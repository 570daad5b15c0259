use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::questions::entities::QuestionType;

/// 创建题目请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub text: String,
    pub question_type: QuestionType,
    /// 期望排序；为空或已被占用时由存储层改派为 max+1
    pub sort_order: Option<i32>,
    pub points: f64,
    pub required: Option<bool>,
    pub time_limit: Option<i32>,
    pub image_url: Option<String>,
    pub image_key: Option<String>,
    pub hint: Option<String>,
    pub explanation: Option<String>,
    pub difficulty: Option<String>,
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub options: Option<Vec<OptionSpec>>,
    /// 显式标准答案，优先于从选项标记派生
    pub correct_answers: Option<Vec<CorrectAnswerSpec>>,
}

/// 更新题目请求（部分更新，未提供的字段保持不变）
///
/// 子表语义由 `options` / `correct_answers` 是否出现决定：
/// - 两者都给：整体替换两者
/// - 只给 options：替换选项并重新派生标准答案
/// - 只给 correct_answers：仅替换标准答案（空数组表示清空）
/// - 两者都不给：子表不动
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuestionRequest {
    pub text: Option<String>,
    pub question_type: Option<QuestionType>,
    pub sort_order: Option<i32>,
    pub points: Option<f64>,
    pub required: Option<bool>,
    pub time_limit: Option<i32>,
    pub image_url: Option<String>,
    pub image_key: Option<String>,
    pub hint: Option<String>,
    pub explanation: Option<String>,
    pub difficulty: Option<String>,
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub options: Option<Vec<OptionSpec>>,
    pub correct_answers: Option<Vec<CorrectAnswerSpec>>,
}

/// 选项（创建或整体替换时的单项）
///
/// 更新时带 `id` 的项会被视为对已有行的更新，不带 `id` 的为新增；
/// 新数组中缺失的已有行会被删除。
#[derive(Debug, Clone, Deserialize)]
pub struct OptionSpec {
    pub id: Option<i64>,
    pub text: String,
    pub sort_order: Option<i32>,
    pub is_correct: Option<bool>,
    pub image_url: Option<String>,
    pub image_key: Option<String>,
}

/// 标准答案（创建或整体替换时的单项）
#[derive(Debug, Clone, Deserialize)]
pub struct CorrectAnswerSpec {
    pub answer_text: Option<String>,
    pub answer_number: Option<f64>,
    pub answer_date: Option<DateTime<Utc>>,
    pub option_ids: Option<Vec<i64>>,
    pub answer_payload: Option<serde_json::Value>,
}
