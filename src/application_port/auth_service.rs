use crate::api::ApiError;
use crate::domain_model::{LoginCredentials, PasswordChange, ProfileUpdate, Registration, User};

/// Outcome of a login or registration. The tokens themselves are kept by
/// the session and are not handed back to callers.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: Option<User>,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, registration: Registration) -> Result<SignedIn, ApiError>;
    async fn login(&self, credentials: LoginCredentials) -> Result<SignedIn, ApiError>;
    /// Always leaves the local session cleared, whatever the server says.
    async fn logout(&self) -> Result<(), ApiError>;
    async fn profile(&self) -> Result<User, ApiError>;
    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, ApiError>;
    async fn change_password(&self, change: PasswordChange) -> Result<(), ApiError>;
    /// The logged-in user when a session exists and the backend still
    /// accepts it; `None` otherwise.
    async fn check_session(&self) -> Result<Option<User>, ApiError>;
}
