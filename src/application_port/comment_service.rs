use crate::api::ApiError;
use crate::domain_model::{Comment, CommentId, Slug};

/// Comments addressed through their activity.
#[async_trait::async_trait]
pub trait CommentService: Send + Sync {
    async fn list(&self, activity: &Slug) -> Result<Vec<Comment>, ApiError>;
    async fn get(&self, activity: &Slug, id: CommentId) -> Result<Comment, ApiError>;
    async fn create(&self, activity: &Slug, text: String) -> Result<Comment, ApiError>;
    async fn update(&self, activity: &Slug, id: CommentId, text: String)
    -> Result<Comment, ApiError>;
    /// Soft delete: the backend only marks the comment inactive.
    async fn delete(&self, activity: &Slug, id: CommentId) -> Result<(), ApiError>;
}
