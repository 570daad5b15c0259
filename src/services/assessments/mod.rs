pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod publish;
pub mod release_results;
pub mod unpublish;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assessments::requests::{
    AssessmentListParams, CreateAssessmentRequest, UpdateAssessmentRequest,
};
use crate::storage::Storage;

pub struct AssessmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssessmentService {
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

    pub async fn create_assessment(
        &self,
        request: &HttpRequest,
        req: CreateAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assessment(self, request, req).await
    }

    pub async fn list_assessments(
        &self,
        request: &HttpRequest,
        query: AssessmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assessments(self, request, query).await
    }

    pub async fn get_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assessment(self, request, assessment_id).await
    }

    pub async fn update_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        req: UpdateAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assessment(self, request, assessment_id, req).await
    }

    pub async fn delete_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assessment(self, request, assessment_id).await
    }

    pub async fn publish_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        publish::publish_assessment(self, request, assessment_id).await
    }

    pub async fn unpublish_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        unpublish::unpublish_assessment(self, request, assessment_id).await
    }

    pub async fn release_results(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        release_results::release_results(self, request, assessment_id).await
    }
}
