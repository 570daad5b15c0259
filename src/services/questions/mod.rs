pub mod add;
pub mod delete;
pub mod delete_image;
pub mod delete_orphan;
pub mod detail;
pub mod list;
pub mod update;
pub mod upload_image;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::media::MediaStore;
use crate::models::questions::requests::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_media(&self, request: &HttpRequest) -> Arc<dyn MediaStore> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn MediaStore>>>()
            .expect("Media store not found in app data")
            .get_ref()
            .clone()
    }

    pub async fn add_question(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        req: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        add::add_question(self, request, assessment_id, req).await
    }

    pub async fn update_question(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        question_id: i64,
        req: UpdateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_question(self, request, assessment_id, question_id, req).await
    }

    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_question(self, request, assessment_id, question_id).await
    }

    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_questions(self, request, assessment_id).await
    }

    pub async fn get_question(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_question(self, request, assessment_id, question_id).await
    }

    pub async fn upload_question_image(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload_image::upload_question_image(self, request, payload).await
    }

    pub async fn delete_question_image(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete_image::delete_question_image(self, request, assessment_id, question_id).await
    }

    pub async fn delete_orphaned_image(
        &self,
        request: &HttpRequest,
        key: String,
    ) -> ActixResult<HttpResponse> {
        delete_orphan::delete_orphaned_image(self, request, key).await
    }
}
