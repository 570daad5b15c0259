//! 答题记录实体
//!
//! 由答题运行时写入，本引擎只做读取与聚合。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_id: i64,
    pub participant_id: i64,
    pub attempt_number: i32,
    pub status: String,
    pub score: Option<f64>,
    pub percentage: Option<f64>,
    pub passed: Option<bool>,
    pub started_at: i64,
    pub submitted_at: Option<i64>,
    pub time_spent: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
    #[sea_orm(has_many = "super::responses::Entity")]
    Responses,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
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
    pub fn into_attempt(self) -> crate::models::attempts::entities::Attempt {
        use crate::models::attempts::entities::{Attempt, AttemptStatus};
        use chrono::{DateTime, Utc};

        Attempt {
            id: self.id,
            assessment_id: self.assessment_id,
            participant_id: self.participant_id,
            attempt_number: self.attempt_number,
            status: self
                .status
                .parse::<AttemptStatus>()
                .unwrap_or(AttemptStatus::InProgress),
            score: self.score,
            percentage: self.percentage,
            passed: self.passed,
            started_at: DateTime::<Utc>::from_timestamp(self.started_at, 0).unwrap_or_default(),
            submitted_at: self
                .submitted_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            time_spent: self.time_spent,
        }
    }
}
