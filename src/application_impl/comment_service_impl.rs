use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::application_port::CommentService;
use crate::domain_model::{Comment, CommentDraft, CommentId, Slug};
use std::sync::Arc;

/// GET/POST `/activities/{activity}/comments/`
fn comments(activity: &Slug) -> String {
    format!("/activities/{activity}/comments/")
}

/// GET/PATCH/DELETE `/activities/{activity}/comments/{id}/`
fn comment(activity: &Slug, id: CommentId) -> String {
    format!("/activities/{activity}/comments/{id}/")
}

pub struct HttpCommentService {
    client: Arc<ApiClient>,
}

impl HttpCommentService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl CommentService for HttpCommentService {
    async fn list(&self, activity: &Slug) -> Result<Vec<Comment>, ApiError> {
        self.client.fetch_list(ApiRequest::get(comments(activity))).await
    }

    async fn get(&self, activity: &Slug, id: CommentId) -> Result<Comment, ApiError> {
        self.client.fetch(ApiRequest::get(comment(activity, id))).await
    }

    async fn create(&self, activity: &Slug, text: String) -> Result<Comment, ApiError> {
        self.client
            .fetch(ApiRequest::post(comments(activity)).json(&CommentDraft { text })?)
            .await
    }

    async fn update(
        &self,
        activity: &Slug,
        id: CommentId,
        text: String,
    ) -> Result<Comment, ApiError> {
        self.client
            .fetch(ApiRequest::patch(comment(activity, id)).json(&CommentDraft { text })?)
            .await
    }

    async fn delete(&self, activity: &Slug, id: CommentId) -> Result<(), ApiError> {
        self.client
            .dispatch(ApiRequest::delete(comment(activity, id)))
            .await
    }
}
