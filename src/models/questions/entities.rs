use serde::{Deserialize, Serialize};

// 题型家族：派生逻辑只按家族分支，不逐一枚举 12 种题型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFamily {
    // 选择类：有选项，标准答案可从 is_correct 标记派生
    Choice,
    // 自由作答类：文本/数值/日期等单值答案
    FreeText,
    // 结构化类：匹配/排序，答案是任意 JSON 负载
    Structured,
}

// 题型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,   // 单选
    MultipleChoice, // 多选
    ShortAnswer,    // 简答
    LongAnswer,     // 论述
    TrueFalse,      // 判断
    FillBlank,      // 填空
    Matching,       // 匹配
    Ordering,       // 排序
    FileUpload,     // 文件上传
    Numeric,        // 数值
    Date,           // 日期
    RatingScale,    // 量表
}

impl QuestionType {
    pub fn family(&self) -> QuestionFamily {
        match self {
            QuestionType::SingleChoice | QuestionType::MultipleChoice | QuestionType::TrueFalse => {
                QuestionFamily::Choice
            }
            QuestionType::Matching | QuestionType::Ordering => QuestionFamily::Structured,
            QuestionType::ShortAnswer
            | QuestionType::LongAnswer
            | QuestionType::FillBlank
            | QuestionType::FileUpload
            | QuestionType::Numeric
            | QuestionType::Date
            | QuestionType::RatingScale => QuestionFamily::FreeText,
        }
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<QuestionType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的题型: '{s}'. 支持的题型: single_choice, multiple_choice, short_answer, \
                 long_answer, true_false, fill_blank, matching, ordering, file_upload, numeric, \
                 date, rating_scale"
            ))
        })
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::ShortAnswer => "short_answer",
            QuestionType::LongAnswer => "long_answer",
            QuestionType::TrueFalse => "true_false",
            QuestionType::FillBlank => "fill_blank",
            QuestionType::Matching => "matching",
            QuestionType::Ordering => "ordering",
            QuestionType::FileUpload => "file_upload",
            QuestionType::Numeric => "numeric",
            QuestionType::Date => "date",
            QuestionType::RatingScale => "rating_scale",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_choice" => Ok(QuestionType::SingleChoice),
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "short_answer" => Ok(QuestionType::ShortAnswer),
            "long_answer" => Ok(QuestionType::LongAnswer),
            "true_false" => Ok(QuestionType::TrueFalse),
            "fill_blank" => Ok(QuestionType::FillBlank),
            "matching" => Ok(QuestionType::Matching),
            "ordering" => Ok(QuestionType::Ordering),
            "file_upload" => Ok(QuestionType::FileUpload),
            "numeric" => Ok(QuestionType::Numeric),
            "date" => Ok(QuestionType::Date),
            "rating_scale" => Ok(QuestionType::RatingScale),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    // 唯一 ID
    pub id: i64,
    // 所属测评 ID
    pub assessment_id: i64,
    // 题干
    pub text: String,
    // 题型
    pub question_type: QuestionType,
    // 测评内排序，唯一
    pub sort_order: i32,
    // 分值（最小 0.1）
    pub points: f64,
    // 是否必答
    pub required: bool,
    // 单题限时（秒）
    pub time_limit: Option<i32>,
    // 题干配图
    pub image_url: Option<String>,
    pub image_key: Option<String>,
    // 提示
    pub hint: Option<String>,
    // 答案解析
    pub explanation: Option<String>,
    // 难度标签
    pub difficulty: Option<String>,
    // 作答长度约束（文本类）
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    // 作答数值约束（数值/量表类）
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub sort_order: i32,
    pub is_correct: bool,
    pub image_url: Option<String>,
    pub image_key: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 标准答案：answer_text / answer_number / answer_date / option_ids /
/// answer_payload 中恰有一个被填充
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectAnswer {
    pub id: i64,
    pub question_id: i64,
    pub answer_text: Option<String>,
    pub answer_number: Option<f64>,
    pub answer_date: Option<chrono::DateTime<chrono::Utc>>,
    pub option_ids: Option<Vec<i64>>,
    pub answer_payload: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_grouping() {
        assert_eq!(QuestionType::SingleChoice.family(), QuestionFamily::Choice);
        assert_eq!(QuestionType::MultipleChoice.family(), QuestionFamily::Choice);
        assert_eq!(QuestionType::TrueFalse.family(), QuestionFamily::Choice);
        assert_eq!(QuestionType::Matching.family(), QuestionFamily::Structured);
        assert_eq!(QuestionType::Ordering.family(), QuestionFamily::Structured);
        assert_eq!(QuestionType::Numeric.family(), QuestionFamily::FreeText);
        assert_eq!(QuestionType::RatingScale.family(), QuestionFamily::FreeText);
    }

    #[test]
    fn test_round_trip_strings() {
        for qt in [
            QuestionType::SingleChoice,
            QuestionType::FillBlank,
            QuestionType::Ordering,
            QuestionType::Date,
        ] {
            assert_eq!(qt.to_string().parse::<QuestionType>().unwrap(), qt);
        }
        assert!("essay".parse::<QuestionType>().is_err());
    }
}
