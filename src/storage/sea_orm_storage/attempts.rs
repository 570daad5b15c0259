//! 答题记录存储操作
//!
//! 记录由答题运行时写入，这里只做按租户过滤的读取，供统计聚合使用。

use super::SeaOrmStorage;
use crate::entity::assessments::Column as AssessmentColumn;
use crate::entity::attempts::{Column as AttemptColumn, Entity as Attempts};
use crate::errors::{AssessmentError, Result};
use crate::models::attempts::entities::Attempt;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    /// 某测评的全部答题记录，最近提交在前
    pub async fn list_attempts_by_assessment_impl(
        &self,
        school_id: i64,
        assessment_id: i64,
    ) -> Result<Vec<Attempt>> {
        let assessment = self
            .get_assessment_model(school_id, assessment_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(format!("测评不存在: {assessment_id}")))?;

        let attempts = Attempts::find()
            .filter(AttemptColumn::AssessmentId.eq(assessment.id))
            .order_by_desc(AttemptColumn::SubmittedAt)
            .order_by_asc(AttemptColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询答题记录失败: {e}")))?;

        Ok(attempts.into_iter().map(|m| m.into_attempt()).collect())
    }

    /// 某参与者在本租户内的全部答题记录，最近提交在前
    ///
    /// 通过关联测评表过滤租户，跨租户的记录不会泄露。
    pub async fn list_attempts_by_participant_impl(
        &self,
        school_id: i64,
        participant_id: i64,
    ) -> Result<Vec<Attempt>> {
        let attempts = Attempts::find()
            .inner_join(crate::entity::assessments::Entity)
            .filter(AssessmentColumn::SchoolId.eq(school_id))
            .filter(AttemptColumn::ParticipantId.eq(participant_id))
            .order_by_desc(AttemptColumn::SubmittedAt)
            .order_by_asc(AttemptColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询答题记录失败: {e}")))?;

        Ok(attempts.into_iter().map(|m| m.into_attempt()).collect())
    }
}
