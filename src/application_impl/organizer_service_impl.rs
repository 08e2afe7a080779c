use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::application_port::OrganizerService;
use crate::domain_model::{Activity, Organizer, OrganizerDraft, Slug};
use std::sync::Arc;

/// GET/POST `/organizers/`
fn organizers() -> &'static str {
    "/organizers/"
}

/// GET/PATCH/DELETE `/organizers/{slug}/`
fn organizer(slug: &Slug) -> String {
    format!("/organizers/{slug}/")
}

/// GET `/organizers/{slug}/activities/`
fn organizer_activities(slug: &Slug) -> String {
    format!("/organizers/{slug}/activities/")
}

pub struct HttpOrganizerService {
    client: Arc<ApiClient>,
}

impl HttpOrganizerService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl OrganizerService for HttpOrganizerService {
    #[tracing::instrument(skip(self))]
    async fn list(
        &self,
        search: Option<String>,
        ordering: Option<String>,
    ) -> Result<Vec<Organizer>, ApiError> {
        let pairs = [("search", search), ("ordering", ordering)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)));
        self.client
            .fetch_list(ApiRequest::get(organizers()).query_pairs(pairs))
            .await
    }

    #[tracing::instrument(skip(self), fields(slug = %slug))]
    async fn get(&self, slug: &Slug) -> Result<Organizer, ApiError> {
        self.client.fetch(ApiRequest::get(organizer(slug))).await
    }

    /// Staff see every activity, everyone else only upcoming published ones.
    #[tracing::instrument(skip(self), fields(slug = %slug))]
    async fn activities(&self, slug: &Slug) -> Result<Vec<Activity>, ApiError> {
        self.client
            .fetch_list(ApiRequest::get(organizer_activities(slug)))
            .await
    }

    async fn create(&self, draft: OrganizerDraft) -> Result<Organizer, ApiError> {
        self.client
            .fetch(ApiRequest::post(organizers()).json(&draft)?)
            .await
    }

    async fn update(&self, slug: &Slug, draft: OrganizerDraft) -> Result<Organizer, ApiError> {
        self.client
            .fetch(ApiRequest::patch(organizer(slug)).json(&draft)?)
            .await
    }

    async fn delete(&self, slug: &Slug) -> Result<(), ApiError> {
        self.client.dispatch(ApiRequest::delete(organizer(slug))).await
    }
}
