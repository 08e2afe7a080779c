use crate::api::ApiError;
use crate::domain_model::{Activity, Organizer, OrganizerDraft, Slug};

#[async_trait::async_trait]
pub trait OrganizerService: Send + Sync {
    async fn list(
        &self,
        search: Option<String>,
        ordering: Option<String>,
    ) -> Result<Vec<Organizer>, ApiError>;
    async fn get(&self, slug: &Slug) -> Result<Organizer, ApiError>;
    async fn activities(&self, slug: &Slug) -> Result<Vec<Activity>, ApiError>;
    async fn create(&self, draft: OrganizerDraft) -> Result<Organizer, ApiError>;
    async fn update(&self, slug: &Slug, draft: OrganizerDraft) -> Result<Organizer, ApiError>;
    async fn delete(&self, slug: &Slug) -> Result<(), ApiError>;
}
