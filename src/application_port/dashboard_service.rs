use crate::api::ApiError;
use crate::domain_model::Activity;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardStats {
    pub total_organizers: usize,
    pub total_activities: usize,
    pub published_activities: usize,
    pub draft_activities: usize,
    pub recent_activities: Vec<Activity>,
}

#[async_trait::async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self) -> Result<DashboardStats, ApiError>;
}
