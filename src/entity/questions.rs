//! 题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub question_type: String,
    pub sort_order: i32,
    pub points: f64,
    pub required: bool,
    pub time_limit: Option<i32>,
    pub image_url: Option<String>,
    pub image_key: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub hint: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub explanation: Option<String>,
    pub difficulty: Option<String>,
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
    #[sea_orm(has_many = "super::question_options::Entity")]
    Options,
    #[sea_orm(has_many = "super::correct_answers::Entity")]
    CorrectAnswers,
    #[sea_orm(has_many = "super::responses::Entity")]
    Responses,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl Related<super::question_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Options.def()
    }
}

impl Related<super::correct_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CorrectAnswers.def()
    }
}

impl Related<super::responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Responses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_question(self) -> crate::models::questions::entities::Question {
        use crate::models::questions::entities::{Question, QuestionType};
        use chrono::{DateTime, Utc};

        Question {
            id: self.id,
            assessment_id: self.assessment_id,
            text: self.text,
            question_type: self
                .question_type
                .parse::<QuestionType>()
                .unwrap_or(QuestionType::ShortAnswer),
            sort_order: self.sort_order,
            points: self.points,
            required: self.required,
            time_limit: self.time_limit,
            image_url: self.image_url,
            image_key: self.image_key,
            hint: self.hint,
            explanation: self.explanation,
            difficulty: self.difficulty,
            min_length: self.min_length,
            max_length: self.max_length,
            min_value: self.min_value,
            max_value: self.max_value,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
