use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::application_port::{AuthService, SignedIn};
use crate::domain_model::{
    CredentialPair, LoginCredentials, PasswordChange, ProfileUpdate, Registration, User,
};
use crate::logger::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const REGISTER: &str = "/auth/register/";
const LOGIN: &str = "/auth/login/";
const LOGOUT: &str = "/auth/logout/";
const PROFILE: &str = "/auth/profile/";
const CHANGE_PASSWORD: &str = "/auth/change-password/";

/// Login and registration both answer with a fresh token pair and, usually,
/// the user record.
#[derive(Debug, Deserialize)]
struct TokenGrant {
    #[serde(default)]
    access: Option<String>,
    #[serde(default)]
    refresh: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Serialize)]
struct LogoutRequest<'a> {
    refresh_token: &'a str,
}

pub struct HttpAuthService {
    client: Arc<ApiClient>,
}

impl HttpAuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn sign_in(&self, endpoint: &str, request: ApiRequest) -> Result<SignedIn, ApiError> {
        let grant: TokenGrant = self.client.fetch(request.anonymous()).await?;
        let pair = CredentialPair::from_parts(grant.access, grant.refresh).ok_or_else(|| {
            ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: "response is missing the access or refresh token".to_string(),
            }
        })?;
        self.client.session().establish(pair).await?;
        Ok(SignedIn { user: grant.user })
    }
}

#[async_trait::async_trait]
impl AuthService for HttpAuthService {
    #[tracing::instrument(skip_all, fields(username = %registration.username))]
    async fn register(&self, registration: Registration) -> Result<SignedIn, ApiError> {
        let request = ApiRequest::post(REGISTER).json(&registration)?;
        let signed_in = self.sign_in(REGISTER, request).await?;
        info!("registered");
        Ok(signed_in)
    }

    #[tracing::instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: LoginCredentials) -> Result<SignedIn, ApiError> {
        let request = ApiRequest::post(LOGIN).json(&credentials)?;
        let signed_in = self.sign_in(LOGIN, request).await?;
        info!("logged in");
        Ok(signed_in)
    }

    #[tracing::instrument(skip_all)]
    async fn logout(&self) -> Result<(), ApiError> {
        if let Some(refresh) = self.client.session().refresh_token().await {
            let notify = ApiRequest::post(LOGOUT).json(&LogoutRequest {
                refresh_token: refresh.as_str(),
            })?;
            if let Err(e) = self.client.dispatch(notify).await {
                warn!(error = %e, "logout request failed, clearing local session anyway");
            }
        }
        self.client.session().clear().await?;
        Ok(())
    }

    async fn profile(&self) -> Result<User, ApiError> {
        self.client.fetch(ApiRequest::get(PROFILE)).await
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, ApiError> {
        self.client
            .fetch(ApiRequest::patch(PROFILE).json(&update)?)
            .await
    }

    async fn change_password(&self, change: PasswordChange) -> Result<(), ApiError> {
        self.client
            .dispatch(ApiRequest::put(CHANGE_PASSWORD).json(&change)?)
            .await
    }

    #[tracing::instrument(skip_all)]
    async fn check_session(&self) -> Result<Option<User>, ApiError> {
        if !self.client.session().is_authenticated().await {
            return Ok(None);
        }

        match self.profile().await {
            Ok(user) => Ok(Some(user)),
            // A flaky network says nothing about the session; keep it.
            Err(e @ (ApiError::Network { .. } | ApiError::Timeout { .. })) => Err(e),
            Err(e) => {
                info!(error = %e, "session rejected, logging out");
                self.logout().await?;
                Ok(None)
            }
        }
    }
}
