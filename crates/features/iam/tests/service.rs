use machex_database::Database;
use machex_iam::{IamError, IamService};
use machex_kernel::domain::config::SecurityConfig;
use machex_kernel::domain::roles::RoleSet;

async fn service(db_name: &str) -> IamService {
    let db = Database::builder()
        .url("mem://")
        .session("iam_test", db_name)
        .init()
        .await
        .expect("connect to mem://");

    let service = IamService::new(&SecurityConfig::default(), db);
    service.bootstrap().await.expect("bootstrap default operator");
    service
}

#[tokio::test]
async fn default_admin_can_log_in() {
    let service = service("login").await;

    let (token, profile) = service.login("admin", "admin").await.expect("login");
    assert_eq!(token.len(), 32);
    assert_eq!(profile.login, "admin");
    assert!(profile.roles.contains(RoleSet::ADMIN));
    assert!(profile.roles.can_edit());
}

#[tokio::test]
async fn wrong_credentials_are_rejected_identically() {
    let service = service("reject").await;

    let unknown = service.login("nobody", "admin").await.unwrap_err();
    let wrong = service.login("admin", "wrong").await.unwrap_err();

    assert!(matches!(unknown, IamError::Unauthorized { .. }));
    assert!(matches!(wrong, IamError::Unauthorized { .. }));
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn issued_tokens_authenticate_until_logout() {
    let service = service("session").await;

    let (token, _) = service.login("admin", "admin").await.expect("login");

    let profile = service.authenticate(&token).await.expect("authenticate");
    assert_eq!(profile.login, "admin");

    service.logout(&token).await.expect("logout");

    let err = service.authenticate(&token).await.unwrap_err();
    assert!(matches!(err, IamError::Unauthorized { .. }));
}

#[tokio::test]
async fn garbage_tokens_never_authenticate() {
    let service = service("garbage").await;

    let err = service.authenticate("not-a-real-token").await.unwrap_err();
    assert!(matches!(err, IamError::Unauthorized { .. }));
}

#[tokio::test]
async fn bootstrap_is_idempotent() {
    let service = service("bootstrap").await;

    // A second bootstrap must not duplicate or reset the admin account.
    service.bootstrap().await.expect("second bootstrap");
    service.login("admin", "admin").await.expect("login still works");
}
