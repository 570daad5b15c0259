use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::path::Path;

use super::QuestionService;
use crate::config::AppConfig;
use crate::middlewares::RequireTenant;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate_magic_bytes;

/// 上传题图
///
/// 上传先于持久化：这里只写 blob 并返回 {url, key}，调用方把引用
/// 随题目创建/更新写入数据库。调用方失败时应通过孤儿清理接口删除 blob。
pub async fn upload_question_image(
    service: &QuestionService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    if RequireTenant::extract_tenant(req).is_none() {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取租户信息",
        )));
    }

    let config = AppConfig::get();
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    // 文件相关信息
    let mut file_uploaded = false;
    let mut extension = String::new();
    let mut buffer: Vec<u8> = Vec::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "file" {
            if file_uploaded {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::MultifileUploadNotAllowed,
                    "一次只能上传一个文件",
                )));
            }
            file_uploaded = true;

            // 先获取原始文件名
            let original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            // 提取扩展名并校验
            extension = Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| format!(".{}", ext.to_lowercase()))
                .unwrap_or_default();

            if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "不支持的图片类型",
                )));
            }

            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let data = chunk?;

                // 第一个 chunk 时验证魔术字节
                if first_chunk {
                    first_chunk = false;
                    if !validate_magic_bytes(&data, &extension) {
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::FileTypeNotAllowed,
                            "文件内容与扩展名不匹配",
                        )));
                    }
                }

                // 校验大小
                if buffer.len() + data.len() > max_size {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "图片大小超出限制",
                    )));
                }
                buffer.extend_from_slice(&data);
            }
        }
    }

    if !file_uploaded || buffer.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "请求中没有文件",
        )));
    }

    let media = service.get_media(req);
    match media.upload(&buffer, &extension).await {
        Ok(uploaded) => Ok(HttpResponse::Ok().json(ApiResponse::success(uploaded, "图片上传成功"))),
        Err(e) => {
            tracing::error!("{}", e.format_simple());
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::MediaStorageFailed,
                    format!("图片上传失败: {e}"),
                )),
            )
        }
    }
}
