//! 标准答案实体
//!
//! 一道题可以有多行标准答案（可接受的等价答案）。`option_ids` 以 JSON
//! 数组存储选择题选项 ID，`answer_payload` 存储匹配/排序题的结构化答案。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "correct_answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub question_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub answer_text: Option<String>,
    pub answer_number: Option<f64>,
    pub answer_date: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub option_ids: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub answer_payload: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_correct_answer(self) -> crate::models::questions::entities::CorrectAnswer {
        use crate::models::questions::entities::CorrectAnswer;
        use chrono::{DateTime, Utc};

        CorrectAnswer {
            id: self.id,
            question_id: self.question_id,
            answer_text: self.answer_text,
            answer_number: self.answer_number,
            answer_date: self
                .answer_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            option_ids: self
                .option_ids
                .as_deref()
                .and_then(|s| serde_json::from_str::<Vec<i64>>(s).ok()),
            answer_payload: self
                .answer_payload
                .as_deref()
                .and_then(|s| serde_json::from_str(s).ok()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
