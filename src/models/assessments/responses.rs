use serde::{Deserialize, Serialize};

use crate::models::PaginationInfo;
use crate::models::assessments::entities::Assessment;

/// 测评列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct AssessmentListResponse {
    pub items: Vec<AssessmentListItem>,
    pub pagination: PaginationInfo,
}

/// 测评列表项（附题目数）
#[derive(Debug, Serialize, Deserialize)]
pub struct AssessmentListItem {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub question_count: i64,
}
