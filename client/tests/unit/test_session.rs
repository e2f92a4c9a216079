//! Session handling against a mock backend

mod support;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use openapi_client::models::DeploymentChoice;

use quickops::authn::session::SessionStoreExt;
use quickops::errors::QuickOpsError;
use quickops::forms::credentials::CredentialsForm;
use quickops::notify::NoticeLevel;
use quickops::pages::auth::{login, logout, register};
use quickops::pages::detail::ProjectDetailPage;
use quickops::routes::{AuthMode, Navigation, Route};

use support::{context, project_json, signed_in_context, Behaviour, MockBackend, RecordingNotifier};

#[tokio::test]
async fn test_unauthorized_list_clears_session() {
    let mock = MockBackend::new(Behaviour {
        unauthorized_list: true,
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    assert_eq!(ctx.navigate("/").await, Navigation::Render(Route::Projects));

    let err = assert_err!(ctx.refresh_projects().await);
    assert!(matches!(err, QuickOpsError::Unauthorized(_)));

    assert!(!ctx.is_signed_in().await);
    assert!(ctx.session.current().await.is_none());
    assert!(!ctx.projects.is_loading());
    assert_eq!(ctx.navigate("/").await, Navigation::Redirect(Route::Login));
    assert_eq!(ctx.navigate("/project/p1").await, Navigation::Redirect(Route::Login));
}

#[tokio::test]
async fn test_inactive_account_gets_no_session() {
    let mock = MockBackend::new(Behaviour {
        login_active: false,
        ..Default::default()
    });
    let ctx = context(&mock.start().await, AuthMode::Required).await;
    let notifier = RecordingNotifier::default();

    let form = CredentialsForm::new("dev@example.com", "secret");
    let err = assert_err!(login(&ctx, &form, &notifier).await);
    assert!(matches!(err, QuickOpsError::Rejected(_)));

    assert!(!ctx.is_signed_in().await);
    assert_eq!(
        notifier.messages(NoticeLevel::Error),
        vec!["Account is not active.".to_string()]
    );
}

#[tokio::test]
async fn test_login_attaches_bearer_to_later_calls() {
    let mock = MockBackend::new(Behaviour {
        login_active: true,
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        ..Default::default()
    });
    let ctx = context(&mock.start().await, AuthMode::Required).await;
    let notifier = RecordingNotifier::default();

    let form = CredentialsForm::new("dev@example.com", "secret");
    let session = assert_ok!(login(&ctx, &form, &notifier).await);
    assert_eq!(session.display_name(), "dev@example.com");
    assert_eq!(notifier.messages(NoticeLevel::Success), vec!["Logged in!".to_string()]);
    assert_eq!(ctx.navigate("/login").await, Navigation::Redirect(Route::Projects));

    let login_call = &mock.calls_to("POST", "/auth/login")[0];
    assert_eq!(login_call.auth, None);
    assert_eq!(login_call.body.as_ref().unwrap()["password"], "secret");

    assert_ok!(ctx.refresh_projects().await);
    let list = &mock.calls_to("GET", "/projects")[0];
    assert_eq!(list.auth.as_deref(), Some("Bearer tok-1"));

    assert_ok!(logout(&ctx, &notifier).await);
    assert!(!ctx.is_signed_in().await);
}

#[tokio::test]
async fn test_register_does_not_sign_in() {
    let mock = MockBackend::new(Behaviour::default());
    let ctx = context(&mock.start().await, AuthMode::Required).await;
    let notifier = RecordingNotifier::default();

    let form = CredentialsForm::new("new@example.com", "secret");
    assert_ok!(register(&ctx, &form, &notifier).await);

    assert!(!ctx.is_signed_in().await);
    assert_eq!(
        notifier.messages(NoticeLevel::Success),
        vec!["Account created! Please log in.".to_string()]
    );
}

#[tokio::test]
async fn test_invalid_credentials_send_nothing() {
    let mock = MockBackend::new(Behaviour::default());
    let ctx = context(&mock.start().await, AuthMode::Required).await;
    let notifier = RecordingNotifier::default();

    assert_err!(login(&ctx, &CredentialsForm::new("nobody", "secret"), &notifier).await);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_disabled_mode_sends_no_bearer() {
    let mock = MockBackend::new(Behaviour {
        unauthorized_list: false,
        ..Default::default()
    });
    let ctx = context(&mock.start().await, AuthMode::Disabled).await;

    assert_ok!(ctx.refresh_projects().await);
    assert_eq!(mock.calls_to("GET", "/projects")[0].auth, None);
    assert_eq!(ctx.navigate("/").await, Navigation::Render(Route::Projects));
    assert_eq!(ctx.navigate("/login").await, Navigation::Redirect(Route::Projects));
}

#[tokio::test]
async fn test_unauthorized_detail_load_clears_session() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![project_json("p1", "Demo", "deployed", Some("VM"))],
        unauthorized_get: true,
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    let err = assert_err!(page.load(&ctx, &notifier).await);
    assert!(matches!(err, QuickOpsError::Unauthorized(_)));

    assert!(!ctx.is_signed_in().await);
    assert!(page.project().is_none());
    assert_eq!(page.error(), Some("Failed to load project details"));
    assert_eq!(ctx.navigate("/project/p1").await, Navigation::Redirect(Route::Login));
}

#[tokio::test]
async fn test_unauthorized_settle_clears_session() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        deploy_response: json!({
            "status": "IN_PROGRESS",
            "stages": [{ "id": "1", "name": "Build", "status": "IN_PROGRESS" }],
            "buildId": "7",
        }),
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert_ok!(page.select_target(DeploymentChoice::Vm));
    assert_ok!(page.deploy(&ctx, &notifier).await);
    assert!(page.is_submitting());

    mock.update(|b| b.unauthorized_get = true);
    let err = assert_err!(page.settle(&ctx, |_| async {}).await);
    assert!(matches!(err, QuickOpsError::Unauthorized(_)));

    assert!(!ctx.is_signed_in().await);
    assert!(!page.is_submitting());
    assert!(mock.calls_to("GET", "/projects").is_empty());
}
