use serde::{Deserialize, Serialize};

// 测评状态（发布生命周期）
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Draft,     // 草稿
    Published, // 已发布（未到开始时间）
    Active,    // 进行中
    Closed,    // 已结束
    Archived,  // 已归档
}

impl AssessmentStatus {
    /// 是否为可答题的已发布状态
    pub fn is_active(&self) -> bool {
        matches!(self, AssessmentStatus::Published | AssessmentStatus::Active)
    }

    /// 是否锁定内容编辑（closed/archived 拒绝所有题目/选项变更）
    pub fn is_locked(&self) -> bool {
        matches!(self, AssessmentStatus::Closed | AssessmentStatus::Archived)
    }
}

impl<'de> Deserialize<'de> for AssessmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AssessmentStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的测评状态: '{s}'. 支持的状态: draft, published, active, closed, archived"
            ))
        })
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentStatus::Draft => write!(f, "draft"),
            AssessmentStatus::Published => write!(f, "published"),
            AssessmentStatus::Active => write!(f, "active"),
            AssessmentStatus::Closed => write!(f, "closed"),
            AssessmentStatus::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for AssessmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AssessmentStatus::Draft),
            "published" => Ok(AssessmentStatus::Published),
            "active" => Ok(AssessmentStatus::Active),
            "closed" => Ok(AssessmentStatus::Closed),
            "archived" => Ok(AssessmentStatus::Archived),
            _ => Err(format!("Invalid assessment status: {s}")),
        }
    }
}

// 评分模式
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum GradingMode {
    Automatic, // 全部客观题自动评分
    Manual,    // 人工评分
    Mixed,     // 混合
}

impl<'de> Deserialize<'de> for GradingMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<GradingMode>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的评分模式: '{s}'. 支持的模式: automatic, manual, mixed"
            ))
        })
    }
}

impl std::fmt::Display for GradingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradingMode::Automatic => write!(f, "automatic"),
            GradingMode::Manual => write!(f, "manual"),
            GradingMode::Mixed => write!(f, "mixed"),
        }
    }
}

impl std::str::FromStr for GradingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "automatic" => Ok(GradingMode::Automatic),
            "manual" => Ok(GradingMode::Manual),
            "mixed" => Ok(GradingMode::Mixed),
            _ => Err(format!("Invalid grading mode: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    // 唯一 ID
    pub id: i64,
    // 租户（学校）ID，所有读写都按它过滤
    pub school_id: i64,
    // 所属科目 ID
    pub subject_id: i64,
    // 所属知识点/章节 ID
    pub topic_id: Option<i64>,
    // 标题
    pub title: String,
    // 描述
    pub description: Option<String>,
    // 答题说明
    pub instructions: Option<String>,
    // 测评类型标签（quiz / exam / practice ...）
    pub assessment_type: String,
    // 评分模式
    pub grading_mode: GradingMode,
    // 生命周期状态
    pub status: AssessmentStatus,
    // 答题窗口
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
    // 每人最大答题次数
    pub attempt_limit: Option<i32>,
    // 及格分（百分比）
    pub passing_score: Option<f64>,
    // 总分，始终等于所有题目分值之和
    pub total_points: f64,
    // 是否打乱题目顺序
    pub shuffle_questions: bool,
    // 答题后是否展示标准答案
    pub show_correct_answers: bool,
    // 发布标记
    pub is_published: bool,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    // 成绩发布标记
    pub is_result_released: bool,
    pub result_released_at: Option<chrono::DateTime<chrono::Utc>>,
    // 创建者 ID
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
