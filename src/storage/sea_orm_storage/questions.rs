//! 题目存储操作（题目组合器的核心）
//!
//! 题目与其选项、标准答案总是在同一事务内写入：排序冲突改派、
//! 答案派生、总分重算要么一起生效，要么一起回滚。

use super::SeaOrmStorage;
use crate::entity::assessments::{
    ActiveModel as AssessmentActiveModel, Model as AssessmentDbModel,
};
use crate::entity::correct_answers::{
    ActiveModel as CorrectAnswerActiveModel, Column as CorrectAnswerColumn,
    Entity as CorrectAnswers,
};
use crate::entity::question_options::{
    ActiveModel as OptionActiveModel, Column as OptionColumn, Entity as QuestionOptions,
    Model as OptionDbModel,
};
use crate::entity::questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Questions,
    Model as QuestionDbModel,
};
use crate::entity::responses::{Column as ResponseColumn, Entity as Responses};
use crate::errors::{AssessmentError, Result};
use crate::models::questions::{
    entities::QuestionFamily,
    requests::{CorrectAnswerSpec, CreateQuestionRequest, OptionSpec, UpdateQuestionRequest},
    responses::{QuestionListItem, QuestionListResponse, QuestionWithChildren},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::warn;

/// 分值下限
const MIN_POINTS: f64 = 0.1;

impl SeaOrmStorage {
    /// 向测评添加题目
    pub async fn add_question_impl(
        &self,
        school_id: i64,
        assessment_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<QuestionWithChildren> {
        validate_points(req.points)?;
        if let Some(order) = req.sort_order {
            validate_sort_order(order)?;
        }

        let assessment = self
            .require_unlocked_assessment(school_id, assessment_id)
            .await?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AssessmentError::database_operation(format!("开启事务失败: {e}")))?;

        // 排序冲突在事务内解决，并发添加不会产生重复排序
        let taken = taken_sort_orders(&txn, assessment.id).await?;
        let sort_order = resolve_sort_order(&taken, req.sort_order);

        let now = chrono::Utc::now().timestamp();
        let question = QuestionActiveModel {
            assessment_id: Set(assessment.id),
            text: Set(req.text),
            question_type: Set(req.question_type.to_string()),
            sort_order: Set(sort_order),
            points: Set(req.points),
            required: Set(req.required.unwrap_or(true)),
            time_limit: Set(req.time_limit),
            image_url: Set(req.image_url),
            image_key: Set(req.image_key),
            hint: Set(req.hint),
            explanation: Set(req.explanation),
            difficulty: Set(req.difficulty),
            min_length: Set(req.min_length),
            max_length: Set(req.max_length),
            min_value: Set(req.min_value),
            max_value: Set(req.max_value),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AssessmentError::database_operation(format!("创建题目失败: {e}")))?;

        let options =
            insert_options(&txn, question.id, &req.options.unwrap_or_default(), now).await?;

        let answers = if let Some(specs) = req.correct_answers {
            // 显式答案优先于派生
            insert_answer_specs(&txn, question.id, &specs, &options, now).await?
        } else {
            insert_derived_answer(&txn, &question, &options, now).await?
        };

        recompute_total_points(&txn, assessment.id, now).await?;

        txn.commit()
            .await
            .map_err(|e| AssessmentError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(QuestionWithChildren {
            question: question.into_question(),
            options: options.into_iter().map(|o| o.into_option()).collect(),
            correct_answers: answers
                .into_iter()
                .map(|a| a.into_correct_answer())
                .collect(),
        })
    }

    /// 部分更新题目
    ///
    /// 子表的四种情形见 [`UpdateQuestionRequest`] 的文档。
    pub async fn update_question_impl(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<QuestionWithChildren> {
        if let Some(points) = update.points {
            validate_points(points)?;
        }
        if let Some(order) = update.sort_order {
            validate_sort_order(order)?;
        }

        let assessment = self
            .require_unlocked_assessment(school_id, assessment_id)
            .await?;
        let existing = self
            .get_question_model(assessment.id, question_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(format!("题目不存在: {question_id}")))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AssessmentError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let mut model = QuestionActiveModel {
            id: Set(existing.id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(text) = update.text {
            model.text = Set(text);
        }
        if let Some(question_type) = update.question_type {
            model.question_type = Set(question_type.to_string());
        }
        if let Some(requested) = update.sort_order
            && requested != existing.sort_order
        {
            // 本题当前占用的排序不算冲突
            let taken: Vec<i32> = taken_sort_orders(&txn, assessment.id)
                .await?
                .into_iter()
                .filter(|&o| o != existing.sort_order)
                .collect();
            model.sort_order = Set(resolve_sort_order(&taken, Some(requested)));
        }
        if let Some(points) = update.points {
            model.points = Set(points);
        }
        if let Some(required) = update.required {
            model.required = Set(required);
        }
        if let Some(time_limit) = update.time_limit {
            model.time_limit = Set(Some(time_limit));
        }
        if let Some(image_url) = update.image_url {
            model.image_url = Set(Some(image_url));
        }
        if let Some(image_key) = update.image_key {
            model.image_key = Set(Some(image_key));
        }
        if let Some(hint) = update.hint {
            model.hint = Set(Some(hint));
        }
        if let Some(explanation) = update.explanation {
            model.explanation = Set(Some(explanation));
        }
        if let Some(difficulty) = update.difficulty {
            model.difficulty = Set(Some(difficulty));
        }
        if let Some(min_length) = update.min_length {
            model.min_length = Set(Some(min_length));
        }
        if let Some(max_length) = update.max_length {
            model.max_length = Set(Some(max_length));
        }
        if let Some(min_value) = update.min_value {
            model.min_value = Set(Some(min_value));
        }
        if let Some(max_value) = update.max_value {
            model.max_value = Set(Some(max_value));
        }

        let question = model
            .update(&txn)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("更新题目失败: {e}")))?;

        match (update.options, update.correct_answers) {
            (Some(option_specs), Some(answer_specs)) => {
                // 两者都给：整体替换两者
                let options = reconcile_options(&txn, question.id, &option_specs, now).await?;
                replace_answers(&txn, question.id).await?;
                insert_answer_specs(&txn, question.id, &answer_specs, &options, now).await?;
            }
            (Some(option_specs), None) => {
                // 只替换选项：标准答案按新选项重新派生
                let options = reconcile_options(&txn, question.id, &option_specs, now).await?;
                replace_answers(&txn, question.id).await?;
                insert_derived_answer(&txn, &question, &options, now).await?;
            }
            (None, Some(answer_specs)) => {
                // 只替换标准答案，空数组表示清空
                let options = load_options(&txn, question.id).await?;
                replace_answers(&txn, question.id).await?;
                insert_answer_specs(&txn, question.id, &answer_specs, &options, now).await?;
            }
            (None, None) => {}
        }

        recompute_total_points(&txn, assessment.id, now).await?;

        txn.commit()
            .await
            .map_err(|e| AssessmentError::database_operation(format!("提交事务失败: {e}")))?;

        // 提交后重读子表，返回最终状态
        let options = load_options(&self.db, question.id).await?;
        let answers = load_answers(&self.db, question.id).await?;

        Ok(QuestionWithChildren {
            question: question.into_question(),
            options: options.into_iter().map(|o| o.into_option()).collect(),
            correct_answers: answers
                .into_iter()
                .map(|a| a.into_correct_answer())
                .collect(),
        })
    }

    /// 删除题目；已有作答时拒绝
    pub async fn delete_question_impl(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
    ) -> Result<bool> {
        let assessment = self
            .require_unlocked_assessment(school_id, assessment_id)
            .await?;
        let existing = match self.get_question_model(assessment.id, question_id).await? {
            Some(m) => m,
            None => return Ok(false),
        };

        let response_count = Responses::find()
            .filter(ResponseColumn::QuestionId.eq(existing.id))
            .count(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询作答记录失败: {e}")))?;

        if response_count > 0 {
            return Err(AssessmentError::has_responses(format!(
                "题目 {} 已有 {} 条作答记录，不能删除",
                existing.id, response_count
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AssessmentError::database_operation(format!("开启事务失败: {e}")))?;

        CorrectAnswers::delete_many()
            .filter(CorrectAnswerColumn::QuestionId.eq(existing.id))
            .exec(&txn)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("删除标准答案失败: {e}")))?;
        QuestionOptions::delete_many()
            .filter(OptionColumn::QuestionId.eq(existing.id))
            .exec(&txn)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("删除选项失败: {e}")))?;
        Questions::delete_by_id(existing.id)
            .exec(&txn)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("删除题目失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        recompute_total_points(&txn, assessment.id, now).await?;

        txn.commit()
            .await
            .map_err(|e| AssessmentError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }

    /// 列出测评的全部题目（按排序升序，带作答数）
    pub async fn list_questions_impl(
        &self,
        school_id: i64,
        assessment_id: i64,
    ) -> Result<QuestionListResponse> {
        let assessment = self
            .get_assessment_model(school_id, assessment_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(format!("测评不存在: {assessment_id}")))?;

        let questions = Questions::find()
            .filter(QuestionColumn::AssessmentId.eq(assessment.id))
            .order_by_asc(QuestionColumn::SortOrder)
            .all(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询题目列表失败: {e}")))?;

        let mut items = Vec::with_capacity(questions.len());
        for question in questions {
            let options = load_options(&self.db, question.id).await?;
            let answers = load_answers(&self.db, question.id).await?;
            let response_count = Responses::find()
                .filter(ResponseColumn::QuestionId.eq(question.id))
                .count(&self.db)
                .await
                .map_err(|e| {
                    AssessmentError::database_operation(format!("查询作答数失败: {e}"))
                })? as i64;

            items.push(QuestionListItem {
                question: question.into_question(),
                options: options.into_iter().map(|o| o.into_option()).collect(),
                correct_answers: answers
                    .into_iter()
                    .map(|a| a.into_correct_answer())
                    .collect(),
                response_count,
            });
        }

        let total = items.len() as i64;
        Ok(QuestionListResponse { items, total })
    }

    /// 获取单题详情
    pub async fn get_question_impl(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
    ) -> Result<Option<QuestionWithChildren>> {
        let assessment = match self.get_assessment_model(school_id, assessment_id).await? {
            Some(m) => m,
            None => return Ok(None),
        };
        let question = match self.get_question_model(assessment.id, question_id).await? {
            Some(m) => m,
            None => return Ok(None),
        };

        let options = load_options(&self.db, question.id).await?;
        let answers = load_answers(&self.db, question.id).await?;

        Ok(Some(QuestionWithChildren {
            question: question.into_question(),
            options: options.into_iter().map(|o| o.into_option()).collect(),
            correct_answers: answers
                .into_iter()
                .map(|a| a.into_correct_answer())
                .collect(),
        }))
    }

    /// 清除题图引用，返回之前的 image_key
    ///
    /// 只清数据库行。blob 删除由调用方在行清除成功后尽力执行，
    /// 失败时只记日志不回滚。
    pub async fn clear_question_image_impl(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
    ) -> Result<Option<String>> {
        let assessment = self
            .require_unlocked_assessment(school_id, assessment_id)
            .await?;
        let existing = self
            .get_question_model(assessment.id, question_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(format!("题目不存在: {question_id}")))?;

        let prior_key = existing.image_key.clone();

        let model = QuestionActiveModel {
            id: Set(existing.id),
            image_url: Set(None),
            image_key: Set(None),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        model
            .update(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("清除题图失败: {e}")))?;

        Ok(prior_key)
    }

    /// 按租户获取测评并拒绝 closed/archived 下的内容变更
    async fn require_unlocked_assessment(
        &self,
        school_id: i64,
        assessment_id: i64,
    ) -> Result<AssessmentDbModel> {
        use crate::models::assessments::entities::AssessmentStatus;

        let assessment = self
            .get_assessment_model(school_id, assessment_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(format!("测评不存在: {assessment_id}")))?;

        let status = assessment
            .status
            .parse::<AssessmentStatus>()
            .unwrap_or(AssessmentStatus::Draft);
        if status.is_locked() {
            return Err(AssessmentError::assessment_locked(format!(
                "测评 {} 处于 {} 状态，内容不可修改",
                assessment.id, assessment.status
            )));
        }
        Ok(assessment)
    }

    /// 获取属于某测评的题目数据库模型
    async fn get_question_model(
        &self,
        assessment_id: i64,
        question_id: i64,
    ) -> Result<Option<QuestionDbModel>> {
        Questions::find_by_id(question_id)
            .filter(QuestionColumn::AssessmentId.eq(assessment_id))
            .one(&self.db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("查询题目失败: {e}")))
    }
}

/// 查询测评当前已占用的排序
async fn taken_sort_orders<C: ConnectionTrait>(db: &C, assessment_id: i64) -> Result<Vec<i32>> {
    let questions = Questions::find()
        .filter(QuestionColumn::AssessmentId.eq(assessment_id))
        .all(db)
        .await
        .map_err(|e| AssessmentError::database_operation(format!("查询排序失败: {e}")))?;
    Ok(questions.into_iter().map(|q| q.sort_order).collect())
}

/// 排序改派：期望排序可用就用，为空或冲突则改派为 max+1
fn resolve_sort_order(taken: &[i32], requested: Option<i32>) -> i32 {
    match requested {
        Some(order) if order >= 1 && !taken.contains(&order) => order,
        _ => taken.iter().copied().max().unwrap_or(0) + 1,
    }
}

/// 插入选项行，排序缺省为数组下标 + 1
async fn insert_options<C: ConnectionTrait>(
    db: &C,
    question_id: i64,
    specs: &[OptionSpec],
    now: i64,
) -> Result<Vec<OptionDbModel>> {
    let mut rows = Vec::with_capacity(specs.len());
    for (idx, spec) in specs.iter().enumerate() {
        let row = OptionActiveModel {
            question_id: Set(question_id),
            text: Set(spec.text.clone()),
            sort_order: Set(spec.sort_order.unwrap_or(idx as i32 + 1)),
            is_correct: Set(spec.is_correct.unwrap_or(false)),
            image_url: Set(spec.image_url.clone()),
            image_key: Set(spec.image_key.clone()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| AssessmentError::database_operation(format!("创建选项失败: {e}")))?;
        rows.push(row);
    }
    Ok(rows)
}

/// 选项整体替换的对账：带 id 的更新、不带 id 的新增、缺失的删除
async fn reconcile_options<C: ConnectionTrait>(
    db: &C,
    question_id: i64,
    specs: &[OptionSpec],
    now: i64,
) -> Result<Vec<OptionDbModel>> {
    let existing = load_options(db, question_id).await?;
    let existing_ids: Vec<i64> = existing.iter().map(|o| o.id).collect();
    let plan = reconcile_plan(&existing_ids, specs)?;

    if !plan.to_delete.is_empty() {
        QuestionOptions::delete_many()
            .filter(OptionColumn::Id.is_in(plan.to_delete.clone()))
            .exec(db)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("删除选项失败: {e}")))?;
    }

    for (id, spec) in &plan.to_update {
        OptionActiveModel {
            id: Set(*id),
            text: Set(spec.text.clone()),
            sort_order: Set(spec.sort_order.unwrap_or(1)),
            is_correct: Set(spec.is_correct.unwrap_or(false)),
            image_url: Set(spec.image_url.clone()),
            image_key: Set(spec.image_key.clone()),
            ..Default::default()
        }
        .update(db)
        .await
        .map_err(|e| AssessmentError::database_operation(format!("更新选项失败: {e}")))?;
    }

    for (idx, spec) in plan.to_insert.iter().enumerate() {
        OptionActiveModel {
            question_id: Set(question_id),
            text: Set(spec.text.clone()),
            sort_order: Set(spec.sort_order.unwrap_or(idx as i32 + 1)),
            is_correct: Set(spec.is_correct.unwrap_or(false)),
            image_url: Set(spec.image_url.clone()),
            image_key: Set(spec.image_key.clone()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| AssessmentError::database_operation(format!("创建选项失败: {e}")))?;
    }

    load_options(db, question_id).await
}

/// 对账计划
struct ReconcilePlan {
    to_delete: Vec<i64>,
    to_update: Vec<(i64, OptionSpec)>,
    to_insert: Vec<OptionSpec>,
}

fn reconcile_plan(existing_ids: &[i64], incoming: &[OptionSpec]) -> Result<ReconcilePlan> {
    let mut to_update = Vec::new();
    let mut to_insert = Vec::new();
    let mut kept = Vec::new();

    for spec in incoming {
        match spec.id {
            Some(id) => {
                if !existing_ids.contains(&id) {
                    return Err(AssessmentError::validation(format!(
                        "选项 {id} 不属于该题目"
                    )));
                }
                kept.push(id);
                to_update.push((id, spec.clone()));
            }
            None => to_insert.push(spec.clone()),
        }
    }

    let to_delete = existing_ids
        .iter()
        .copied()
        .filter(|id| !kept.contains(id))
        .collect();

    Ok(ReconcilePlan {
        to_delete,
        to_update,
        to_insert,
    })
}

/// 从选项标记派生的答案选项 ID；没有标记时不派生
fn derived_option_ids(options: &[OptionDbModel]) -> Option<Vec<i64>> {
    let ids: Vec<i64> = options
        .iter()
        .filter(|o| o.is_correct)
        .map(|o| o.id)
        .collect();
    if ids.is_empty() { None } else { Some(ids) }
}

/// 为选择类题目派生一行标准答案；其他家族不派生
async fn insert_derived_answer<C: ConnectionTrait>(
    db: &C,
    question: &QuestionDbModel,
    options: &[OptionDbModel],
    now: i64,
) -> Result<Vec<crate::entity::correct_answers::Model>> {
    use crate::models::questions::entities::QuestionType;

    let family = question
        .question_type
        .parse::<QuestionType>()
        .map(|t| t.family())
        .unwrap_or(QuestionFamily::FreeText);

    if family != QuestionFamily::Choice {
        return Ok(Vec::new());
    }
    let Some(ids) = derived_option_ids(options) else {
        return Ok(Vec::new());
    };

    let row = CorrectAnswerActiveModel {
        question_id: Set(question.id),
        option_ids: Set(Some(serde_json::to_string(&ids)?)),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| AssessmentError::database_operation(format!("创建标准答案失败: {e}")))?;

    Ok(vec![row])
}

/// 插入显式标准答案
///
/// `option_ids` 引用了不存在的选项时记警告并照常持久化，
/// 与历史数据行为保持一致。
async fn insert_answer_specs<C: ConnectionTrait>(
    db: &C,
    question_id: i64,
    specs: &[CorrectAnswerSpec],
    options: &[OptionDbModel],
    now: i64,
) -> Result<Vec<crate::entity::correct_answers::Model>> {
    // 空答案行没有任何匹配依据，先整体校验再写入
    if specs.iter().any(|spec| {
        spec.answer_text.is_none()
            && spec.answer_number.is_none()
            && spec.answer_date.is_none()
            && spec.option_ids.is_none()
            && spec.answer_payload.is_none()
    }) {
        return Err(AssessmentError::validation(
            "标准答案必须至少提供一种答案内容",
        ));
    }

    let valid_ids: Vec<i64> = options.iter().map(|o| o.id).collect();
    let mut rows = Vec::with_capacity(specs.len());

    for spec in specs {
        if let Some(ref ids) = spec.option_ids {
            let unknown: Vec<i64> = ids
                .iter()
                .copied()
                .filter(|id| !valid_ids.contains(id))
                .collect();
            if !unknown.is_empty() {
                warn!(
                    question_id,
                    "标准答案引用了不存在的选项: {unknown:?}，仍按原样持久化"
                );
            }
        }

        let row = CorrectAnswerActiveModel {
            question_id: Set(question_id),
            answer_text: Set(spec.answer_text.clone()),
            answer_number: Set(spec.answer_number),
            answer_date: Set(spec.answer_date.map(|dt| dt.timestamp())),
            option_ids: Set(spec
                .option_ids
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?),
            answer_payload: Set(spec
                .answer_payload
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| AssessmentError::database_operation(format!("创建标准答案失败: {e}")))?;
        rows.push(row);
    }
    Ok(rows)
}

/// 清空某题的全部标准答案行
async fn replace_answers<C: ConnectionTrait>(db: &C, question_id: i64) -> Result<()> {
    CorrectAnswers::delete_many()
        .filter(CorrectAnswerColumn::QuestionId.eq(question_id))
        .exec(db)
        .await
        .map_err(|e| AssessmentError::database_operation(format!("删除标准答案失败: {e}")))?;
    Ok(())
}

async fn load_options<C: ConnectionTrait>(db: &C, question_id: i64) -> Result<Vec<OptionDbModel>> {
    QuestionOptions::find()
        .filter(OptionColumn::QuestionId.eq(question_id))
        .order_by_asc(OptionColumn::SortOrder)
        .all(db)
        .await
        .map_err(|e| AssessmentError::database_operation(format!("查询选项失败: {e}")))
}

async fn load_answers<C: ConnectionTrait>(
    db: &C,
    question_id: i64,
) -> Result<Vec<crate::entity::correct_answers::Model>> {
    CorrectAnswers::find()
        .filter(CorrectAnswerColumn::QuestionId.eq(question_id))
        .order_by_asc(CorrectAnswerColumn::Id)
        .all(db)
        .await
        .map_err(|e| AssessmentError::database_operation(format!("查询标准答案失败: {e}")))
}

/// 重算测评总分：所有题目分值之和，保留两位小数
async fn recompute_total_points<C: ConnectionTrait>(
    db: &C,
    assessment_id: i64,
    now: i64,
) -> Result<()> {
    let questions = Questions::find()
        .filter(QuestionColumn::AssessmentId.eq(assessment_id))
        .all(db)
        .await
        .map_err(|e| AssessmentError::database_operation(format!("查询题目分值失败: {e}")))?;

    let total: f64 = questions.iter().map(|q| q.points).sum();
    let total = (total * 100.0).round() / 100.0;

    AssessmentActiveModel {
        id: Set(assessment_id),
        total_points: Set(total),
        updated_at: Set(now),
        ..Default::default()
    }
    .update(db)
    .await
    .map_err(|e| AssessmentError::database_operation(format!("更新总分失败: {e}")))?;
    Ok(())
}

fn validate_points(points: f64) -> Result<()> {
    if points < MIN_POINTS {
        return Err(AssessmentError::validation(format!(
            "分值不能小于 {MIN_POINTS}，实际为 {points}"
        )));
    }
    Ok(())
}

fn validate_sort_order(order: i32) -> Result<()> {
    if order < 1 {
        return Err(AssessmentError::validation(format!(
            "排序必须从 1 开始，实际为 {order}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(id: Option<i64>, text: &str) -> OptionSpec {
        OptionSpec {
            id,
            text: text.to_string(),
            sort_order: None,
            is_correct: None,
            image_url: None,
            image_key: None,
        }
    }

    #[test]
    fn test_resolve_sort_order() {
        // 空测评：无论请求什么都从 1 开始
        assert_eq!(resolve_sort_order(&[], None), 1);
        assert_eq!(resolve_sort_order(&[], Some(3)), 3);
        // 可用的请求直接采纳
        assert_eq!(resolve_sort_order(&[1, 2], Some(5)), 5);
        // 冲突或非法改派为 max+1
        assert_eq!(resolve_sort_order(&[1, 2, 3], Some(2)), 4);
        assert_eq!(resolve_sort_order(&[1, 2, 3], Some(0)), 4);
        assert_eq!(resolve_sort_order(&[1, 5], None), 6);
    }

    #[test]
    fn test_reconcile_plan() {
        let existing = vec![10, 11, 12];
        let incoming = vec![opt(Some(10), "改"), opt(None, "新")];
        let plan = reconcile_plan(&existing, &incoming).unwrap();

        assert_eq!(plan.to_delete, vec![11, 12]);
        assert_eq!(plan.to_update.len(), 1);
        assert_eq!(plan.to_update[0].0, 10);
        assert_eq!(plan.to_insert.len(), 1);
        assert_eq!(plan.to_insert[0].text, "新");
    }

    #[test]
    fn test_reconcile_plan_unknown_id() {
        let plan = reconcile_plan(&[10], &[opt(Some(99), "x")]);
        assert!(plan.is_err());
    }

    #[test]
    fn test_derived_option_ids() {
        let mk = |id: i64, is_correct: bool| OptionDbModel {
            id,
            question_id: 1,
            text: String::new(),
            sort_order: 1,
            is_correct,
            image_url: None,
            image_key: None,
            created_at: 0,
        };
        assert_eq!(
            derived_option_ids(&[mk(1, false), mk(2, true), mk(3, true)]),
            Some(vec![2, 3])
        );
        // 没有任何标记：不派生
        assert_eq!(derived_option_ids(&[mk(1, false), mk(2, false)]), None);
        assert_eq!(derived_option_ids(&[]), None);
    }

    #[test]
    fn test_validate_points() {
        assert!(validate_points(0.1).is_ok());
        assert!(validate_points(5.0).is_ok());
        assert!(validate_points(0.05).is_err());
        assert!(validate_points(-1.0).is_err());
    }
}
