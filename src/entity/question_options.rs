//! 题目选项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "question_options")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub question_id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub sort_order: i32,
    pub is_correct: bool,
    pub image_url: Option<String>,
    pub image_key: Option<String>,
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
    pub fn into_option(self) -> crate::models::questions::entities::QuestionOption {
        use crate::models::questions::entities::QuestionOption;
        use chrono::{DateTime, Utc};

        QuestionOption {
            id: self.id,
            question_id: self.question_id,
            text: self.text,
            sort_order: self.sort_order,
            is_correct: self.is_correct,
            image_url: self.image_url,
            image_key: self.image_key,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
