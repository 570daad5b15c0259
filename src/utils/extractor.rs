//! 路径参数安全提取器
//!
//! 路径中的 ID 必须是正整数，解析失败直接返回 400，
//! 不把无效参数透传到业务层。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_id_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|s| s.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => {
                        let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::BadRequest,
                            concat!("路径参数 ", $param, " 必须是正整数"),
                        ));
                        Err(InternalError::from_response("invalid path parameter", response)
                            .into())
                    }
                })
            }
        }
    };
}

define_safe_id_extractor!(SafeIDI64, "id");
define_safe_id_extractor!(SafeQuestionIdI64, "question_id");
define_safe_id_extractor!(SafeParticipantIdI64, "participant_id");
