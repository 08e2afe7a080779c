use crate::api::ApiError;
use crate::domain_model::{Activity, Category, CategoryDraft, Slug};

#[async_trait::async_trait]
pub trait CategoryService: Send + Sync {
    async fn list(
        &self,
        search: Option<String>,
        ordering: Option<String>,
    ) -> Result<Vec<Category>, ApiError>;
    async fn get(&self, slug: &Slug) -> Result<Category, ApiError>;
    /// Published activities of the category dated today or later.
    async fn activities(&self, slug: &Slug) -> Result<Vec<Activity>, ApiError>;
    async fn create(&self, draft: CategoryDraft) -> Result<Category, ApiError>;
    async fn update(&self, slug: &Slug, draft: CategoryDraft) -> Result<Category, ApiError>;
    async fn delete(&self, slug: &Slug) -> Result<(), ApiError>;
}
