//! 测评实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub subject_id: i64,
    pub topic_id: Option<i64>,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub instructions: Option<String>,
    pub assessment_type: String,
    pub grading_mode: String,
    pub status: String,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    pub attempt_limit: Option<i32>,
    pub passing_score: Option<f64>,
    pub total_points: f64,
    pub shuffle_questions: bool,
    pub show_correct_answers: bool,
    pub is_published: bool,
    pub published_at: Option<i64>,
    pub is_result_released: bool,
    pub result_released_at: Option<i64>,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::questions::Entity")]
    Questions,
    #[sea_orm(has_many = "super::attempts::Entity")]
    Attempts,
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl Related<super::attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assessment(self) -> crate::models::assessments::entities::Assessment {
        use crate::models::assessments::entities::{Assessment, AssessmentStatus, GradingMode};
        use chrono::{DateTime, Utc};

        Assessment {
            id: self.id,
            school_id: self.school_id,
            subject_id: self.subject_id,
            topic_id: self.topic_id,
            title: self.title,
            description: self.description,
            instructions: self.instructions,
            assessment_type: self.assessment_type,
            grading_mode: self
                .grading_mode
                .parse::<GradingMode>()
                .unwrap_or(GradingMode::Automatic),
            status: self
                .status
                .parse::<AssessmentStatus>()
                .unwrap_or(AssessmentStatus::Draft),
            starts_at: self
                .starts_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            ends_at: self
                .ends_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            attempt_limit: self.attempt_limit,
            passing_score: self.passing_score,
            total_points: self.total_points,
            shuffle_questions: self.shuffle_questions,
            show_correct_answers: self.show_correct_answers,
            is_published: self.is_published,
            published_at: self
                .published_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            is_result_released: self.is_result_released,
            result_released_at: self
                .result_released_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
