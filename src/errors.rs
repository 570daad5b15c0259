//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_assessment_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AssessmentError {
            $($variant(String),)*
        }

        impl AssessmentError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AssessmentError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AssessmentError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AssessmentError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AssessmentError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AssessmentError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_assessment_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    NotFound("E004", "Resource Not Found"),
    Validation("E005", "Validation Error"),
    AssessmentLocked("E006", "Assessment Locked"),
    HasResponses("E007", "Question Has Responses"),
    HasAttempts("E008", "Assessment Has Attempts"),
    MissingQuestions("E009", "Assessment Has No Questions"),
    Storage("E010", "Media Storage Error"),
    FileOperation("E011", "File Operation Error"),
    Serialization("E012", "Serialization Error"),
    DateParse("E013", "Date Parse Error"),
}

impl AssessmentError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否适合客户端重试（仅校验类与外部存储类错误）
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AssessmentError::Validation(_) | AssessmentError::Storage(_)
        )
    }
}

impl fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AssessmentError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AssessmentError {
    fn from(err: sea_orm::DbErr) -> Self {
        AssessmentError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AssessmentError {
    fn from(err: std::io::Error) -> Self {
        AssessmentError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AssessmentError {
    fn from(err: serde_json::Error) -> Self {
        AssessmentError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AssessmentError {
    fn from(err: chrono::ParseError) -> Self {
        AssessmentError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssessmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AssessmentError::database_config("test").code(), "E001");
        assert_eq!(AssessmentError::validation("test").code(), "E005");
        assert_eq!(AssessmentError::assessment_locked("test").code(), "E006");
        assert_eq!(AssessmentError::missing_questions("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AssessmentError::has_responses("test").error_type(),
            "Question Has Responses"
        );
        assert_eq!(
            AssessmentError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = AssessmentError::validation("points must be >= 0.1");
        assert_eq!(err.message(), "points must be >= 0.1");
    }

    #[test]
    fn test_retryable() {
        assert!(AssessmentError::validation("x").is_retryable());
        assert!(AssessmentError::storage("x").is_retryable());
        assert!(!AssessmentError::not_found("x").is_retryable());
        assert!(!AssessmentError::has_attempts("x").is_retryable());
        assert!(!AssessmentError::assessment_locked("x").is_retryable());
    }

    #[test]
    fn test_format_simple() {
        let err = AssessmentError::assessment_locked("assessment 3 is closed");
        let formatted = err.format_simple();
        assert!(formatted.contains("Assessment Locked"));
        assert!(formatted.contains("assessment 3"));
    }
}
