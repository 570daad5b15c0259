//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assessments;
mod attempts;
mod questions;

use crate::config::AppConfig;
use crate::errors::{AssessmentError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AssessmentError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 从已有连接创建存储实例（迁移由调用方负责，主要用于测试）
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AssessmentError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AssessmentError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AssessmentError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AssessmentError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 测评模块
    async fn create_assessment(
        &self,
        school_id: i64,
        created_by: i64,
        req: CreateAssessmentRequest,
    ) -> Result<Assessment> {
        self.create_assessment_impl(school_id, created_by, req).await
    }

    async fn get_assessment_by_id(&self, school_id: i64, id: i64) -> Result<Option<Assessment>> {
        self.get_assessment_by_id_impl(school_id, id).await
    }

    async fn list_assessments_with_pagination(
        &self,
        school_id: i64,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse> {
        self.list_assessments_with_pagination_impl(school_id, query)
            .await
    }

    async fn update_assessment(
        &self,
        school_id: i64,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        self.update_assessment_impl(school_id, id, update).await
    }

    async fn delete_assessment(&self, school_id: i64, id: i64) -> Result<bool> {
        self.delete_assessment_impl(school_id, id).await
    }

    async fn publish_assessment(&self, school_id: i64, id: i64) -> Result<Assessment> {
        self.publish_assessment_impl(school_id, id).await
    }

    async fn unpublish_assessment(&self, school_id: i64, id: i64) -> Result<Assessment> {
        self.unpublish_assessment_impl(school_id, id).await
    }

    async fn release_results(&self, school_id: i64, id: i64) -> Result<Assessment> {
        self.release_results_impl(school_id, id).await
    }

    // 题目模块
    async fn add_question(
        &self,
        school_id: i64,
        assessment_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<QuestionWithChildren> {
        self.add_question_impl(school_id, assessment_id, req).await
    }

    async fn update_question(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<QuestionWithChildren> {
        self.update_question_impl(school_id, assessment_id, question_id, update)
            .await
    }

    async fn delete_question(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
    ) -> Result<bool> {
        self.delete_question_impl(school_id, assessment_id, question_id)
            .await
    }

    async fn list_questions(
        &self,
        school_id: i64,
        assessment_id: i64,
    ) -> Result<QuestionListResponse> {
        self.list_questions_impl(school_id, assessment_id).await
    }

    async fn get_question(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
    ) -> Result<Option<QuestionWithChildren>> {
        self.get_question_impl(school_id, assessment_id, question_id)
            .await
    }

    async fn clear_question_image(
        &self,
        school_id: i64,
        assessment_id: i64,
        question_id: i64,
    ) -> Result<Option<String>> {
        self.clear_question_image_impl(school_id, assessment_id, question_id)
            .await
    }

    // 答题记录模块
    async fn list_attempts_by_assessment(
        &self,
        school_id: i64,
        assessment_id: i64,
    ) -> Result<Vec<Attempt>> {
        self.list_attempts_by_assessment_impl(school_id, assessment_id)
            .await
    }

    async fn list_attempts_by_participant(
        &self,
        school_id: i64,
        participant_id: i64,
    ) -> Result<Vec<Attempt>> {
        self.list_attempts_by_participant_impl(school_id, participant_id)
            .await
    }
}
