use serde::{Deserialize, Serialize};

// 答题记录状态（由答题运行时维护）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    InProgress, // 进行中
    Submitted,  // 已提交待评分
    Graded,     // 已评分
    Abandoned,  // 已放弃（计入总次数，不计入提交统计）
}

impl AttemptStatus {
    /// 是否计入提交口径（submitted | graded）
    pub fn is_submitted(&self) -> bool {
        matches!(self, AttemptStatus::Submitted | AttemptStatus::Graded)
    }
}

impl<'de> Deserialize<'de> for AttemptStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AttemptStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的答题状态: '{s}'. 支持的状态: in_progress, submitted, graded, abandoned"
            ))
        })
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptStatus::InProgress => write!(f, "in_progress"),
            AttemptStatus::Submitted => write!(f, "submitted"),
            AttemptStatus::Graded => write!(f, "graded"),
            AttemptStatus::Abandoned => write!(f, "abandoned"),
        }
    }
}

impl std::str::FromStr for AttemptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(AttemptStatus::InProgress),
            "submitted" => Ok(AttemptStatus::Submitted),
            "graded" => Ok(AttemptStatus::Graded),
            "abandoned" => Ok(AttemptStatus::Abandoned),
            _ => Err(format!("Invalid attempt status: {s}")),
        }
    }
}

/// 一次答题记录，本引擎的只读输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: i64,
    pub assessment_id: i64,
    pub participant_id: i64,
    pub attempt_number: i32,
    pub status: AttemptStatus,
    pub score: Option<f64>,
    pub percentage: Option<f64>,
    pub passed: Option<bool>,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    // 用时（秒）
    pub time_spent: Option<i64>,
}
