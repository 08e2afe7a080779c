use crate::api::ApiError;
use crate::application_port::{ActivityService, DashboardService, DashboardStats, OrganizerService};
use crate::domain_model::{ActivityQuery, ActivityStatus};
use std::sync::Arc;

const RECENT_ACTIVITIES: usize = 5;

/// Summary for an organizer's dashboard, computed from the lists the
/// backend returns for the current user.
pub struct RealDashboardService {
    organizer_service: Arc<dyn OrganizerService>,
    activity_service: Arc<dyn ActivityService>,
}

impl RealDashboardService {
    pub fn new(
        organizer_service: Arc<dyn OrganizerService>,
        activity_service: Arc<dyn ActivityService>,
    ) -> Self {
        Self {
            organizer_service,
            activity_service,
        }
    }
}

#[async_trait::async_trait]
impl DashboardService for RealDashboardService {
    #[tracing::instrument(skip_all)]
    async fn stats(&self) -> Result<DashboardStats, ApiError> {
        let (organizers, activities) = futures_util::try_join!(
            self.organizer_service.list(None, None),
            self.activity_service.list(ActivityQuery::default()),
        )?;

        let count = |status| activities.iter().filter(|a| a.status == status).count();
        let published_activities = count(ActivityStatus::Published);
        let draft_activities = count(ActivityStatus::Draft);

        Ok(DashboardStats {
            total_organizers: organizers.len(),
            total_activities: activities.len(),
            published_activities,
            draft_activities,
            recent_activities: activities.into_iter().take(RECENT_ACTIVITIES).collect(),
        })
    }
}
