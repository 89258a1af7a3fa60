mod common;

use std::sync::Arc;

use common::{BASE_URL, StubLms, learner, memory_db};
use lms_client::db::repository;
use lms_client::error::AppError;
use lms_client::session::auth::{TOKEN_KEY, USER_KEY};
use lms_client::session::{AuthService, Session, validate_credentials};

#[tokio::test]
async fn test_restore_without_cache_is_signed_out() {
    let db = memory_db().await;
    let auth = AuthService::new(db, Arc::new(StubLms::new()));

    let session = auth.restore(BASE_URL).await.expect("Failed to restore");

    assert!(!session.is_signed_in());
    assert!(session.token().is_none());
    assert_eq!(session.base_url(), BASE_URL);
}

#[tokio::test]
async fn test_sign_in_persists_token_and_user() {
    let db = memory_db().await;
    let auth = AuthService::new(db.clone(), Arc::new(StubLms::new()));
    let mut session = Session::new(BASE_URL);

    let user = auth
        .sign_in(&mut session, "learner", "secret1")
        .await
        .expect("Failed to sign in");

    assert_eq!(user, learner());
    assert!(session.is_signed_in());
    assert_eq!(session.token(), Some("tok-1"));

    let token = repository::fetch_value(&db, TOKEN_KEY)
        .await
        .expect("Failed to read token")
        .expect("token cached");
    assert_eq!(token.value, "tok-1");

    let cached: serde_json::Value = serde_json::from_str(
        &repository::fetch_value(&db, USER_KEY)
            .await
            .expect("Failed to read user")
            .expect("user cached")
            .value,
    )
    .expect("cached user is JSON");
    assert_eq!(cached["data"]["username"], "learner");

    let restored = auth.restore(BASE_URL).await.expect("Failed to restore");
    assert!(restored.is_signed_in());
    assert_eq!(restored.user(), Some(&learner()));
}

#[tokio::test]
async fn test_sign_out_clears_cache_and_session() {
    let db = memory_db().await;
    let auth = AuthService::new(db.clone(), Arc::new(StubLms::new()));
    let mut session = Session::new(BASE_URL);

    auth.sign_in(&mut session, "learner", "secret1")
        .await
        .expect("Failed to sign in");
    auth.sign_out(&mut session).await.expect("Failed to sign out");

    assert!(!session.is_signed_in());
    assert!(session.user().is_none());
    assert!(repository::fetch_value(&db, TOKEN_KEY).await.expect("read").is_none());
    assert!(!auth.restore(BASE_URL).await.expect("restore").is_signed_in());
}

#[tokio::test]
async fn test_restore_requires_both_token_and_user() {
    let db = memory_db().await;
    repository::put_value(&db, TOKEN_KEY, "tok-1")
        .await
        .expect("Failed to write token");
    let auth = AuthService::new(db.clone(), Arc::new(StubLms::new()));

    assert!(!auth.restore(BASE_URL).await.expect("restore").is_signed_in());

    repository::put_value(&db, USER_KEY, "not json")
        .await
        .expect("Failed to write user");
    assert!(!auth.restore(BASE_URL).await.expect("restore").is_signed_in());
}

#[tokio::test]
async fn test_rejected_login_leaves_session_untouched() {
    let db = memory_db().await;
    let api = Arc::new(StubLms::new());
    let auth = AuthService::new(db.clone(), api.clone());
    let mut session = Session::new(BASE_URL);

    let result = auth.sign_in(&mut session, "learner", "wrong99").await;

    assert!(matches!(result, Err(AppError::BadRequest(ref msg)) if msg == "Bad credentials"));
    assert_eq!(api.login_calls(), 1);
    assert!(!session.is_signed_in());
    assert!(repository::fetch_value(&db, TOKEN_KEY).await.expect("read").is_none());
}

#[tokio::test]
async fn test_invalid_credentials_never_reach_the_server() {
    let db = memory_db().await;
    let api = Arc::new(StubLms::new());
    let auth = AuthService::new(db, api.clone());
    let mut session = Session::new(BASE_URL);

    assert!(auth.sign_in(&mut session, "abc", "secret1").await.is_err());
    assert!(auth.sign_in(&mut session, "learner", "secret").await.is_err());
    assert_eq!(api.login_calls(), 0);
}

#[test]
fn test_credential_rules() {
    assert!(validate_credentials("abcd", "abcde1").is_ok());
    assert!(validate_credentials("abc", "abcde1").is_err());
    assert!(validate_credentials("abcd", "abc1").is_err());
    assert!(validate_credentials("abcd", "abcdefg").is_err());
}

#[tokio::test]
async fn test_put_value_overwrites() {
    let db = memory_db().await;

    repository::put_value(&db, TOKEN_KEY, "old").await.expect("write");
    repository::put_value(&db, TOKEN_KEY, "new").await.expect("overwrite");

    let entry = repository::fetch_value(&db, TOKEN_KEY)
        .await
        .expect("read")
        .expect("present");
    assert_eq!(entry.value, "new");
    assert!(chrono::DateTime::parse_from_rfc3339(&entry.updated_at).is_ok());
    assert!(repository::delete_value(&db, TOKEN_KEY).await.expect("delete"));
    assert!(!repository::delete_value(&db, TOKEN_KEY).await.expect("delete again"));
}

#[test]
fn test_session_urls() {
    let session = Session::new("https://lms.example.test/");

    assert_eq!(session.api_url("courses/42"), "https://lms.example.test/api/courses/42");
    assert_eq!(session.asset_url("img/a.png"), "https://lms.example.test/img/a.png");
    assert_eq!(session.asset_url("/img/a.png"), "https://lms.example.test/img/a.png");
}
