use crate::api::{self, ApiClient, Session};
use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::CredentialStore;
use crate::infra::*;
use crate::logger::*;
use crate::settings::Settings;
use std::sync::Arc;
use url::Url;

/// Fully wired client: one session, one HTTP pipeline, and the resource
/// services built on top of it.
pub struct App {
    pub client: Arc<ApiClient>,
    pub auth_service: Arc<dyn AuthService>,
    pub activity_service: Arc<dyn ActivityService>,
    pub organizer_service: Arc<dyn OrganizerService>,
    pub category_service: Arc<dyn CategoryService>,
    pub comment_service: Arc<dyn CommentService>,
    pub dashboard_service: Arc<dyn DashboardService>,
}

impl App {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let base_url: Url = settings.api.base_url.parse()?;

        let store: Arc<dyn CredentialStore> = match settings.session.backend.as_str() {
            "file" => Arc::new(FileCredentialStore::new(&settings.session.path)),
            "memory" => Arc::new(MemoryCredentialStore::new()),
            other => return Err(anyhow::anyhow!("Unknown session backend: {}", other)),
        };
        let session = Arc::new(Session::load(store).await?);

        let client = Arc::new(
            api::build(base_url, session)
                .with_request_timeout(settings.api.request_timeout())
                .with_refresh_timeout(settings.api.refresh_timeout())
                .build(),
        );
        debug!(base_url = %client.base_url(), "api client ready");

        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Arc<ApiClient>) -> Self {
        let auth_service: Arc<dyn AuthService> = Arc::new(HttpAuthService::new(client.clone()));
        let activity_service: Arc<dyn ActivityService> =
            Arc::new(HttpActivityService::new(client.clone()));
        let organizer_service: Arc<dyn OrganizerService> =
            Arc::new(HttpOrganizerService::new(client.clone()));
        let category_service: Arc<dyn CategoryService> =
            Arc::new(HttpCategoryService::new(client.clone()));
        let comment_service: Arc<dyn CommentService> =
            Arc::new(HttpCommentService::new(client.clone()));
        let dashboard_service: Arc<dyn DashboardService> = Arc::new(RealDashboardService::new(
            organizer_service.clone(),
            activity_service.clone(),
        ));

        Self {
            client,
            auth_service,
            activity_service,
            organizer_service,
            category_service,
            comment_service,
            dashboard_service,
        }
    }
}
