//! End-to-end facade flows over the in-memory stores.

use std::sync::Arc;

use doorman_auth::password::PasswordHasher;
use doorman_auth::service::AuthService;
use doorman_auth::session::{ExpiringSessionStore, MemorySessionRegistry};
use doorman_core::config::auth::AuthConfig;
use doorman_core::error::ErrorKind;
use doorman_core::traits::SessionBacking;
use doorman_database::users::MemoryUserStore;

fn build_service(duration_seconds: u64) -> (AuthService, Arc<dyn SessionBacking>) {
    let users = Arc::new(MemoryUserStore::new());
    let registry = Arc::new(MemorySessionRegistry::new());
    let sessions: Arc<dyn SessionBacking> =
        Arc::new(ExpiringSessionStore::new(registry, duration_seconds));
    let hasher = Arc::new(PasswordHasher::new());

    let service = AuthService::new(users, sessions.clone(), hasher, AuthConfig::default());
    (service, sessions)
}

#[tokio::test]
async fn test_register_then_login() {
    let (service, _) = build_service(0);

    service
        .register_user("a@b.com", "correct-horse")
        .await
        .expect("register");

    assert!(service.valid_login("a@b.com", "correct-horse").await.expect("login"));
    assert!(!service.valid_login("a@b.com", "wrong-password").await.expect("login"));
    assert!(!service.valid_login("nobody@b.com", "correct-horse").await.expect("login"));
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let (service, _) = build_service(0);

    service
        .register_user("a@b.com", "correct-horse")
        .await
        .expect("first register");

    let err = service
        .register_user("a@b.com", "other-password")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    let (service, _) = build_service(0);
    let err = service.register_user("a@b.com", "short").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_session_round_trip() {
    let (service, _) = build_service(0);

    let registered = service
        .register_user("a@b.com", "correct-horse")
        .await
        .expect("register");

    let sid = service
        .create_session("a@b.com")
        .await
        .expect("create")
        .expect("session id");

    let user = service
        .user_from_session(&sid)
        .await
        .expect("lookup")
        .expect("logged-in user");
    assert_eq!(user.id, registered.id);
    assert_eq!(user.session_id.as_deref(), Some(sid.as_str()));
}

#[tokio::test]
async fn test_create_session_for_unknown_email() {
    let (service, _) = build_service(0);
    assert_eq!(
        service.create_session("nobody@b.com").await.expect("create"),
        None
    );
}

#[tokio::test]
async fn test_empty_and_unknown_session_ids_resolve_to_nobody() {
    let (service, _) = build_service(0);
    assert!(service.user_from_session("").await.expect("lookup").is_none());
    assert!(
        service
            .user_from_session("never-issued")
            .await
            .expect("lookup")
            .is_none()
    );
}

#[tokio::test]
async fn test_destroy_session_logs_out() {
    let (service, sessions) = build_service(0);

    let user = service
        .register_user("a@b.com", "correct-horse")
        .await
        .expect("register");
    let sid = service
        .create_session("a@b.com")
        .await
        .expect("create")
        .expect("session id");

    service.destroy_session(user.id).await.expect("destroy");

    assert!(service.user_from_session(&sid).await.expect("lookup").is_none());
    // The backing entry is gone too, not just the user column.
    assert_eq!(sessions.user_id_for(&sid).await.expect("lookup"), None);
}

#[tokio::test]
async fn test_relogin_issues_fresh_session() {
    let (service, _) = build_service(0);

    service
        .register_user("a@b.com", "correct-horse")
        .await
        .expect("register");

    let first = service.create_session("a@b.com").await.expect("create").unwrap();
    let second = service.create_session("a@b.com").await.expect("create").unwrap();
    assert_ne!(first, second);

    // The user record carries the latest session id.
    let user = service
        .user_from_session(&second)
        .await
        .expect("lookup")
        .expect("user");
    assert_eq!(user.session_id.as_deref(), Some(second.as_str()));

    // The first id no longer maps to any user record.
    assert!(service.user_from_session(&first).await.expect("lookup").is_none());
}

#[tokio::test]
async fn test_reset_token_flow() {
    let (service, _) = build_service(0);

    service
        .register_user("a@b.com", "correct-horse")
        .await
        .expect("register");

    let token = service
        .reset_password_token("a@b.com")
        .await
        .expect("issue token");

    service
        .update_password(&token, "battery-staple")
        .await
        .expect("update password");

    assert!(!service.valid_login("a@b.com", "correct-horse").await.expect("login"));
    assert!(service.valid_login("a@b.com", "battery-staple").await.expect("login"));

    // The token was single-use.
    let err = service
        .update_password(&token, "another-password")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_reset_token_for_unknown_email() {
    let (service, _) = build_service(0);
    let err = service.reset_password_token("nobody@b.com").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_fresh_token_replaces_previous() {
    let (service, _) = build_service(0);

    service
        .register_user("a@b.com", "correct-horse")
        .await
        .expect("register");

    let stale = service.reset_password_token("a@b.com").await.expect("first token");
    let fresh = service.reset_password_token("a@b.com").await.expect("second token");
    assert_ne!(stale, fresh);

    // Only the latest token is usable: at most one live token per user.
    let err = service.update_password(&stale, "battery-staple").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
    service
        .update_password(&fresh, "battery-staple")
        .await
        .expect("update with fresh token");
}

#[tokio::test]
async fn test_unknown_reset_token_fails() {
    let (service, _) = build_service(0);
    let err = service
        .update_password("never-issued", "battery-staple")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}
