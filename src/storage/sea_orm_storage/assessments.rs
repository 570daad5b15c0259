//! 测评存储操作
//!
//! 生命周期守卫在这里与数据读写同一次调用内完成。

use super::SeaOrmStorage;
use crate::entity::assessments::{ActiveModel, Column, Entity as Assessments};
use crate::entity::attempts::{Column as AttemptColumn, Entity as Attempts};
use crate::entity::correct_answers::{Column as CorrectAnswerColumn, Entity as CorrectAnswers};
use crate::entity::question_options::{Column as OptionColumn, Entity as QuestionOptions};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::errors::{AssessmentError, Result};
use crate::models::{
    PaginationInfo,
    assessments::{
        entities::{Assessment, AssessmentStatus, GradingMode},
        requests::{AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest},
        responses::{AssessmentListItem, AssessmentListResponse},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 按租户获取测评数据库模型
    pub(crate) async fn get_assessment_model(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<crate::entity::assessments::Model>> {
        let result = Assessments::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询测评失败: {e}")))?;
        Ok(result)
    }

    /// 创建测评
    pub async fn create_assessment_impl(
        &self,
        school_id: i64,
        created_by: i64,
        req: CreateAssessmentRequest,
    ) -> Result<Assessment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            school_id: Set(school_id),
            subject_id: Set(req.subject_id),
            topic_id: Set(req.topic_id),
            title: Set(req.title),
            description: Set(req.description),
            instructions: Set(req.instructions),
            assessment_type: Set(req.assessment_type.unwrap_or_else(|| "quiz".to_string())),
            grading_mode: Set(req
                .grading_mode
                .unwrap_or(GradingMode::Automatic)
                .to_string()),
            status: Set(AssessmentStatus::Draft.to_string()),
            starts_at: Set(req.starts_at.map(|dt| dt.timestamp())),
            ends_at: Set(req.ends_at.map(|dt| dt.timestamp())),
            attempt_limit: Set(req.attempt_limit),
            passing_score: Set(req.passing_score),
            total_points: Set(0.0),
            shuffle_questions: Set(req.shuffle_questions.unwrap_or(false)),
            show_correct_answers: Set(req.show_correct_answers.unwrap_or(false)),
            is_published: Set(false),
            is_result_released: Set(false),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("创建测评失败: {e}")))?;

        Ok(result.into_assessment())
    }

    /// 通过 ID 获取测评
    pub async fn get_assessment_by_id_impl(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<Assessment>> {
        Ok(self
            .get_assessment_model(school_id, id)
            .await?
            .map(|m| m.into_assessment()))
    }

    /// 分页列出测评
    pub async fn list_assessments_with_pagination_impl(
        &self,
        school_id: i64,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assessments::find().filter(Column::SchoolId.eq(school_id));

        // 科目筛选
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 搜索条件（按标题搜索）
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询测评总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询测评页数失败: {e}")))?;

        let assessments: Vec<Assessment> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询测评列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_assessment())
            .collect();

        // 查询每个测评的题目数
        let mut items = Vec::with_capacity(assessments.len());
        for assessment in assessments {
            let question_count = Questions::find()
                .filter(QuestionColumn::AssessmentId.eq(assessment.id))
                .count(&self.db)
                .await
                .map_err(|e| {
                    AssessmentError::database_operation(format!("查询题目数失败: {e}"))
                })? as i64;
            items.push(AssessmentListItem {
                assessment,
                question_count,
            });
        }

        Ok(AssessmentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新测评
    ///
    /// `status` 从非活跃改为 published/active 等价于 publish()（含题目数守卫），
    /// 从活跃改回 draft 等价于 unpublish()。
    pub async fn update_assessment_impl(
        &self,
        school_id: i64,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        let existing = match self.get_assessment_model(school_id, id).await? {
            Some(m) => m,
            None => return Ok(None),
        };
        let current_status = existing
            .status
            .parse::<AssessmentStatus>()
            .unwrap_or(AssessmentStatus::Draft);

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(topic_id) = update.topic_id {
            model.topic_id = Set(Some(topic_id));
        }
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(instructions) = update.instructions {
            model.instructions = Set(Some(instructions));
        }
        if let Some(assessment_type) = update.assessment_type {
            model.assessment_type = Set(assessment_type);
        }
        if let Some(grading_mode) = update.grading_mode {
            model.grading_mode = Set(grading_mode.to_string());
        }
        if let Some(starts_at) = update.starts_at {
            model.starts_at = Set(Some(starts_at.timestamp()));
        }
        if let Some(ends_at) = update.ends_at {
            model.ends_at = Set(Some(ends_at.timestamp()));
        }
        if let Some(attempt_limit) = update.attempt_limit {
            model.attempt_limit = Set(Some(attempt_limit));
        }
        if let Some(passing_score) = update.passing_score {
            model.passing_score = Set(Some(passing_score));
        }
        if let Some(shuffle_questions) = update.shuffle_questions {
            model.shuffle_questions = Set(shuffle_questions);
        }
        if let Some(show_correct_answers) = update.show_correct_answers {
            model.show_correct_answers = Set(show_correct_answers);
        }

        if let Some(status) = update.status {
            if status.is_active() && !current_status.is_active() {
                // 等价于 publish()，至少需要一道题目
                self.guard_has_questions(id).await?;
                model.status = Set(status.to_string());
                model.is_published = Set(true);
                model.published_at = Set(Some(now));
            } else if status == AssessmentStatus::Draft && current_status != AssessmentStatus::Draft
            {
                // 等价于 unpublish()，published_at 历史保留
                model.status = Set(AssessmentStatus::Draft.to_string());
                model.is_published = Set(false);
            } else {
                model.status = Set(status.to_string());
            }
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("更新测评失败: {e}")))?;

        self.get_assessment_by_id_impl(school_id, id).await
    }

    /// 删除测评；存在答题记录时拒绝
    pub async fn delete_assessment_impl(&self, school_id: i64, id: i64) -> Result<bool> {
        let existing = match self.get_assessment_model(school_id, id).await? {
            Some(m) => m,
            None => return Ok(false),
        };

        let attempt_count = Attempts::find()
            .filter(AttemptColumn::AssessmentId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询答题记录失败: {e}")))?;

        if attempt_count > 0 {
            return Err(AssessmentError::has_attempts(format!(
                "测评 {} 已有 {} 条答题记录，不能删除",
                existing.id, attempt_count
            )));
        }

        // 题目与子表在同一事务内级联删除
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AssessmentError::database_operation(format!("开启事务失败: {e}")))?;

        let question_ids: Vec<i64> = Questions::find()
            .filter(QuestionColumn::AssessmentId.eq(id))
            .all(&txn)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询题目失败: {e}")))?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if !question_ids.is_empty() {
            CorrectAnswers::delete_many()
                .filter(CorrectAnswerColumn::QuestionId.is_in(question_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| {
                    AssessmentError::database_operation(format!("删除标准答案失败: {e}"))
                })?;
            QuestionOptions::delete_many()
                .filter(OptionColumn::QuestionId.is_in(question_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| AssessmentError::database_operation(format!("删除选项失败: {e}")))?;
            Questions::delete_many()
                .filter(QuestionColumn::AssessmentId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| AssessmentError::database_operation(format!("删除题目失败: {e}")))?;
        }

        let result = Assessments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("删除测评失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AssessmentError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 发布测评（无题目时拒绝）
    pub async fn publish_assessment_impl(&self, school_id: i64, id: i64) -> Result<Assessment> {
        let existing = self
            .get_assessment_model(school_id, id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(format!("测评不存在: {id}")))?;

        self.guard_has_questions(id).await?;

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(existing.id),
            status: Set(AssessmentStatus::Active.to_string()),
            is_published: Set(true),
            published_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("发布测评失败: {e}")))?;

        Ok(result.into_assessment())
    }

    /// 撤回发布（回到 draft；published_at 历史保留）
    pub async fn unpublish_assessment_impl(&self, school_id: i64, id: i64) -> Result<Assessment> {
        let existing = self
            .get_assessment_model(school_id, id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(format!("测评不存在: {id}")))?;

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(existing.id),
            status: Set(AssessmentStatus::Draft.to_string()),
            is_published: Set(false),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("撤回发布失败: {e}")))?;

        Ok(result.into_assessment())
    }

    /// 发布成绩（幂等；强制 status=closed，成绩发布本身不算内容变更）
    pub async fn release_results_impl(&self, school_id: i64, id: i64) -> Result<Assessment> {
        let existing = self
            .get_assessment_model(school_id, id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(format!("测评不存在: {id}")))?;

        // 第二次调用是 no-op 成功，状态不再变化
        if existing.is_result_released {
            return Ok(existing.into_assessment());
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(existing.id),
            status: Set(AssessmentStatus::Closed.to_string()),
            is_result_released: Set(true),
            result_released_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("发布成绩失败: {e}")))?;

        Ok(result.into_assessment())
    }

    /// 发布守卫：测评必须至少有一道题目
    async fn guard_has_questions(&self, assessment_id: i64) -> Result<()> {
        let question_count = Questions::find()
            .filter(QuestionColumn::AssessmentId.eq(assessment_id))
            .count(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询题目数失败: {e}")))?;

        if question_count == 0 {
            return Err(AssessmentError::missing_questions(format!(
                "测评 {assessment_id} 没有题目，不能发布"
            )));
        }
        Ok(())
    }
}
