use serde::{Deserialize, Serialize};

// 业务错误码，随 ApiResponse 返回给调用方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    Success = 0,

    // 通用 HTTP 映射
    BadRequest = 400,
    Unauthorized = 401,
    NotFound = 404,
    InternalServerError = 500,

    // 测评领域错误
    AssessmentNotFound = 1001,
    QuestionNotFound = 1002,
    ValidationFailed = 1003,
    AssessmentLocked = 1004,
    MissingQuestions = 1005,
    AssessmentHasAttempts = 1006,
    QuestionHasResponses = 1007,

    // 媒体文件错误
    FileUploadFailed = 2001,
    FileTypeNotAllowed = 2002,
    FileSizeExceeded = 2003,
    FileNotFound = 2004,
    MultifileUploadNotAllowed = 2005,
    MediaStorageFailed = 2006,
}
