use std::sync::Arc;

use crate::models::{
    assessments::{
        entities::Assessment,
        requests::{AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest},
        responses::AssessmentListResponse,
    },
    attempts::entities::Attempt,
    questions::{
        requests::{CreateQuestionRequest, UpdateQuestionRequest},
        responses::{QuestionListResponse, QuestionWithChildren},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 数据存储层接口
///
/// 所有方法的第一个参数都是租户（学校）ID，读写一律按租户过滤，
/// 不接受跨租户引用。守卫失败返回带类型的错误
/// （NotFound / AssessmentLocked / HasAttempts / HasResponses / MissingQuestions）。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 测评管理方法
    // 创建测评（初始为 draft，totalPoints=0）
    async fn create_assessment(
        &self,
        school_id: i64,
        created_by: i64,
        req: CreateAssessmentRequest,
    ) -> Result<Assessment>;
    // 通过ID获取测评
    async fn get_assessment_by_id(&self, school_id: i64, id: i64) -> Result<Option<Assessment>>;
    // 分页列出测评
    async fn list_assessments_with_pagination(
        &self,
        school_id: i64,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse>;
    // 更新测评；status 变更触发 publish/unpublish 语义
    async fn update_assessment(
        &self,
        school_id: i64,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>>;
    // 删除测评；存在答题记录时拒绝（HasAttempts）
    async fn delete_assessment(&self, school_id: i64, id: i64) -> Result<bool>;
    // 发布；无题目时拒绝（MissingQuestions）
    async fn publish_assessment(&self, school_id: i64, id: i64) -> Result<Assessment>;
    // 撤回发布；published_at 历史保留
    async fn unpublish_assessment(&self, school_id: i64, id: i64) -> Result<Assessment>;
    // 发布成绩；幂等，强制 status=closed
    async fn release_results(&self, school_id: i64, id: i64) -> Result<Assessment>;

    /// 题目组合器方法
    // 添加题目（含选项与标准答案派生），重算总分
    async fn add_question(
        &self,
        school_id: i64,
        assessment_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<QuestionWithChildren>;
    // 部分更新题目；子表语义见 UpdateQuestionRequest
    async fn update_question(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<QuestionWithChildren>;
    // 删除题目；存在作答时拒绝（HasResponses）
    async fn delete_question(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
    ) -> Result<bool>;
    // 列出题目（带作答数）
    async fn list_questions(
        &self,
        school_id: i64,
        assessment_id: i64,
    ) -> Result<QuestionListResponse>;
    // 获取单题详情
    async fn get_question(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
    ) -> Result<Option<QuestionWithChildren>>;
    // 清除题图引用，返回之前的 image_key（行先清，blob 删除由调用方善后）
    async fn clear_question_image(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
    ) -> Result<Option<String>>;

    /// 答题记录读取方法（记录由答题运行时写入）
    // 某测评的全部答题记录
    async fn list_attempts_by_assessment(
        &self,
        school_id: i64,
        assessment_id: i64,
    ) -> Result<Vec<Attempt>>;
    // 某参与者在本租户内的全部答题记录
    async fn list_attempts_by_participant(
        &self,
        school_id: i64,
        participant_id: i64,
    ) -> Result<Vec<Attempt>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
