//! Integration tests for login, logout and session checks

mod common;

use common::{client_on_store, client_with, pair};
use eventboard::app::App;
use eventboard::domain_model::{LoginCredentials, Registration};
use eventboard::domain_port::CredentialStore;
use eventboard::infra::FileCredentialStore;
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn login_persists_token_pair_across_restarts() {
    //* Given
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/api/v1/auth/login/")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({"email": "ann@example.com", "password": "pw"})))
        .with_status(200)
        .with_body(
            r#"{"access": "access-1", "refresh": "refresh-1",
                "user": {"id": 4, "username": "ann", "email": "ann@example.com"}}"#,
        )
        .expect(1)
        .create_async()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let client = client_on_store(&server.url(), Arc::new(FileCredentialStore::new(&path))).await;
    let app = App::with_client(client);

    //* When
    let signed_in = app
        .auth_service
        .login(LoginCredentials {
            email: "ann@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .expect("login succeeds");

    //* Then
    login.assert_async().await;
    assert_eq!(signed_in.user.unwrap().username, "ann");
    let reloaded = FileCredentialStore::new(&path).load().await.unwrap();
    assert_eq!(reloaded, Some(pair("access-1", "refresh-1")));
}

#[tokio::test]
async fn login_with_stale_session_does_not_refresh() {
    //* Given
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/api/v1/auth/login/")
        .with_status(401)
        .with_body(r#"{"detail": "No active account found with the given credentials"}"#)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/v1/auth/token/refresh/")
        .expect(0)
        .create_async()
        .await;
    let (store, client) = client_with(&server.url(), Some(pair("old", "old-refresh"))).await;
    let app = App::with_client(client);

    //* When
    let result = app
        .auth_service
        .login(LoginCredentials {
            email: "ann@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await;

    //* Then
    refresh.assert_async().await;
    assert_eq!(result.unwrap_err().status(), Some(401));
    assert_eq!(store.load().await.unwrap(), Some(pair("old", "old-refresh")));
}

#[tokio::test]
async fn register_without_token_pair_is_rejected() {
    //* Given
    let mut server = Server::new_async().await;
    let _register = server
        .mock("POST", "/api/v1/auth/register/")
        .match_body(Matcher::PartialJson(json!({"password2": "secret123"})))
        .with_status(201)
        .with_body(r#"{"access": "access-only"}"#)
        .create_async()
        .await;
    let (store, client) = client_with(&server.url(), None).await;
    let app = App::with_client(client);

    //* When
    let result = app
        .auth_service
        .register(Registration::new(
            "ann".to_string(),
            "ann@example.com".to_string(),
            "secret123".to_string(),
        ))
        .await;

    //* Then
    assert!(result.is_err());
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn logout_clears_session_even_when_server_fails() {
    //* Given
    let mut server = Server::new_async().await;
    let logout = server
        .mock("POST", "/api/v1/auth/logout/")
        .match_header("authorization", "Bearer access-1")
        .match_body(Matcher::Json(json!({"refresh_token": "refresh-1"})))
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let (store, client) = client_with(&server.url(), Some(pair("access-1", "refresh-1"))).await;
    let app = App::with_client(client);

    //* When
    let result = app.auth_service.logout().await;

    //* Then
    logout.assert_async().await;
    assert!(result.is_ok());
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn logout_without_session_skips_server() {
    //* Given
    let mut server = Server::new_async().await;
    let logout = server
        .mock("POST", "/api/v1/auth/logout/")
        .expect(0)
        .create_async()
        .await;
    let (_store, client) = client_with(&server.url(), None).await;
    let app = App::with_client(client);

    //* When
    app.auth_service.logout().await.unwrap();

    //* Then
    logout.assert_async().await;
}

#[tokio::test]
async fn check_session_logs_out_rejected_session() {
    //* Given
    let mut server = Server::new_async().await;
    let _profile = server
        .mock("GET", "/api/v1/auth/profile/")
        .with_status(403)
        .with_body(r#"{"detail": "User is inactive"}"#)
        .create_async()
        .await;
    let _logout = server
        .mock("POST", "/api/v1/auth/logout/")
        .with_status(205)
        .create_async()
        .await;
    let (store, client) = client_with(&server.url(), Some(pair("access-1", "refresh-1"))).await;
    let app = App::with_client(client);

    //* When
    let user = app.auth_service.check_session().await.unwrap();

    //* Then
    assert!(user.is_none());
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn check_session_accepts_live_session() {
    //* Given
    let mut server = Server::new_async().await;
    let profile = server
        .mock("GET", "/api/v1/auth/profile/")
        .match_header("authorization", "Bearer access-1")
        .with_status(200)
        .with_body(r#"{"id": 4, "username": "ann", "email": "ann@example.com"}"#)
        .expect(1)
        .create_async()
        .await;
    let (_store, client) = client_with(&server.url(), Some(pair("access-1", "refresh-1"))).await;
    let app = App::with_client(client);

    //* When
    let user = app.auth_service.check_session().await.unwrap();

    //* Then
    profile.assert_async().await;
    assert_eq!(user.map(|u| u.username).as_deref(), Some("ann"));
}

#[tokio::test]
async fn check_session_without_credentials_makes_no_call() {
    //* Given
    let mut server = Server::new_async().await;
    let profile = server
        .mock("GET", "/api/v1/auth/profile/")
        .expect(0)
        .create_async()
        .await;
    let (_store, client) = client_with(&server.url(), None).await;
    let app = App::with_client(client);

    //* When
    let user = app.auth_service.check_session().await.unwrap();

    //* Then
    profile.assert_async().await;
    assert!(user.is_none());
}
