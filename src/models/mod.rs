//! 业务数据模型
//!
//! 与 entity 模块的数据库实体分离，按资源拆分为 entities / requests / responses。

pub mod analytics;
pub mod assessments;
pub mod attempts;
pub mod common;
pub mod questions;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，用于启动耗时统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
