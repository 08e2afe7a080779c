use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::application_port::ActivityService;
use crate::domain_model::{
    Activity, ActivityDraft, ActivityPhoto, ActivityQuery, Address, Comment, CommentDraft, Slug,
};
use std::sync::Arc;

/// GET/POST `/activities/`
fn activities() -> &'static str {
    "/activities/"
}

/// GET/PATCH/DELETE `/activities/{slug}/`
fn activity(slug: &Slug) -> String {
    format!("/activities/{slug}/")
}

/// GET `/activities/{slug}/address/`
fn activity_address(slug: &Slug) -> String {
    format!("/activities/{slug}/address/")
}

/// POST `/activities/{slug}/address_update/`
fn activity_address_update(slug: &Slug) -> String {
    format!("/activities/{slug}/address_update/")
}

/// DELETE `/activities/{slug}/address_delete/`
fn activity_address_delete(slug: &Slug) -> String {
    format!("/activities/{slug}/address_delete/")
}

/// GET `/activities/{slug}/comments/`
fn activity_comments(slug: &Slug) -> String {
    format!("/activities/{slug}/comments/")
}

/// POST `/activities/{slug}/add_comment/`
fn activity_add_comment(slug: &Slug) -> String {
    format!("/activities/{slug}/add_comment/")
}

/// GET `/activities/{slug}/photos/`
fn activity_photos(slug: &Slug) -> String {
    format!("/activities/{slug}/photos/")
}

pub struct HttpActivityService {
    client: Arc<ApiClient>,
}

impl HttpActivityService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ActivityService for HttpActivityService {
    #[tracing::instrument(skip(self))]
    async fn list(&self, query: ActivityQuery) -> Result<Vec<Activity>, ApiError> {
        let request = ApiRequest::get(activities()).query_pairs(query.to_pairs());
        self.client.fetch_list(request).await
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, slug: &Slug) -> Result<Activity, ApiError> {
        self.client.fetch(ApiRequest::get(activity(slug))).await
    }

    #[tracing::instrument(skip_all)]
    async fn create(&self, draft: ActivityDraft) -> Result<Activity, ApiError> {
        self.client
            .fetch(ApiRequest::post(activities()).json(&draft)?)
            .await
    }

    #[tracing::instrument(skip(self, draft))]
    async fn update(&self, slug: &Slug, draft: ActivityDraft) -> Result<Activity, ApiError> {
        self.client
            .fetch(ApiRequest::patch(activity(slug)).json(&draft)?)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, slug: &Slug) -> Result<(), ApiError> {
        self.client.dispatch(ApiRequest::delete(activity(slug))).await
    }

    async fn address(&self, slug: &Slug) -> Result<Option<Address>, ApiError> {
        match self
            .client
            .fetch(ApiRequest::get(activity_address(slug)))
            .await
        {
            Ok(address) => Ok(Some(address)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn update_address(&self, slug: &Slug, address: Address) -> Result<Address, ApiError> {
        self.client
            .fetch(ApiRequest::post(activity_address_update(slug)).json(&address)?)
            .await
    }

    async fn delete_address(&self, slug: &Slug) -> Result<(), ApiError> {
        self.client
            .dispatch(ApiRequest::delete(activity_address_delete(slug)))
            .await
    }

    async fn comments(&self, slug: &Slug) -> Result<Vec<Comment>, ApiError> {
        self.client
            .fetch_list(ApiRequest::get(activity_comments(slug)))
            .await
    }

    #[tracing::instrument(skip(self, text))]
    async fn add_comment(&self, slug: &Slug, text: String) -> Result<Comment, ApiError> {
        let draft = CommentDraft { text };
        self.client
            .fetch(ApiRequest::post(activity_add_comment(slug)).json(&draft)?)
            .await
    }

    async fn photos(&self, slug: &Slug) -> Result<Vec<ActivityPhoto>, ApiError> {
        self.client
            .fetch_list(ApiRequest::get(activity_photos(slug)))
            .await
    }
}
