use crate::api::ApiError;
use crate::domain_model::{
    Activity, ActivityDraft, ActivityPhoto, ActivityQuery, Address, Comment, Slug,
};

#[async_trait::async_trait]
pub trait ActivityService: Send + Sync {
    async fn list(&self, query: ActivityQuery) -> Result<Vec<Activity>, ApiError>;
    /// Viewing a published activity bumps its view counter server-side.
    async fn get(&self, slug: &Slug) -> Result<Activity, ApiError>;
    async fn create(&self, draft: ActivityDraft) -> Result<Activity, ApiError>;
    async fn update(&self, slug: &Slug, draft: ActivityDraft) -> Result<Activity, ApiError>;
    async fn delete(&self, slug: &Slug) -> Result<(), ApiError>;

    /// `None` when the activity has no address yet.
    async fn address(&self, slug: &Slug) -> Result<Option<Address>, ApiError>;
    async fn update_address(&self, slug: &Slug, address: Address) -> Result<Address, ApiError>;
    async fn delete_address(&self, slug: &Slug) -> Result<(), ApiError>;

    async fn comments(&self, slug: &Slug) -> Result<Vec<Comment>, ApiError>;
    /// Only published activities accept comments.
    async fn add_comment(&self, slug: &Slug, text: String) -> Result<Comment, ApiError>;

    async fn photos(&self, slug: &Slug) -> Result<Vec<ActivityPhoto>, ApiError>;
}
