use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::application_port::CategoryService;
use crate::domain_model::{Activity, Category, CategoryDraft, Slug};
use std::sync::Arc;

/// GET/POST `/categories/`
fn categories() -> &'static str {
    "/categories/"
}

/// GET/PATCH/DELETE `/categories/{slug}/`
fn category(slug: &Slug) -> String {
    format!("/categories/{slug}/")
}

/// GET `/categories/{slug}/activities/`
fn category_activities(slug: &Slug) -> String {
    format!("/categories/{slug}/activities/")
}

pub struct HttpCategoryService {
    client: Arc<ApiClient>,
}

impl HttpCategoryService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl CategoryService for HttpCategoryService {
    #[tracing::instrument(skip(self))]
    async fn list(
        &self,
        search: Option<String>,
        ordering: Option<String>,
    ) -> Result<Vec<Category>, ApiError> {
        let mut request = ApiRequest::get(categories());
        if let Some(search) = search {
            request = request.query("search", search);
        }
        if let Some(ordering) = ordering {
            request = request.query("ordering", ordering);
        }
        self.client.fetch_list(request).await
    }

    #[tracing::instrument(skip(self), fields(slug = %slug))]
    async fn get(&self, slug: &Slug) -> Result<Category, ApiError> {
        self.client.fetch(ApiRequest::get(category(slug))).await
    }

    #[tracing::instrument(skip(self), fields(slug = %slug))]
    async fn activities(&self, slug: &Slug) -> Result<Vec<Activity>, ApiError> {
        self.client
            .fetch_list(ApiRequest::get(category_activities(slug)))
            .await
    }

    async fn create(&self, draft: CategoryDraft) -> Result<Category, ApiError> {
        self.client
            .fetch(ApiRequest::post(categories()).json(&draft)?)
            .await
    }

    async fn update(&self, slug: &Slug, draft: CategoryDraft) -> Result<Category, ApiError> {
        self.client
            .fetch(ApiRequest::patch(category(slug)).json(&draft)?)
            .await
    }

    async fn delete(&self, slug: &Slug) -> Result<(), ApiError> {
        self.client.dispatch(ApiRequest::delete(category(slug))).await
    }
}
