//! Project creation and deletion against a mock backend

mod support;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use openapi_client::models::Project;
use quickops::errors::QuickOpsError;
use quickops::forms::ValidationError;
use quickops::notify::{AssumeAnswer, NoticeLevel};
use quickops::pages::form::ProjectFormPage;
use quickops::pages::projects::delete_project;

use support::{project_json, signed_in_context, Behaviour, MockBackend, RecordingNotifier};

fn demo_page() -> ProjectFormPage {
    let mut page = ProjectFormPage::new();
    page.form.name = "Demo".to_string();
    page.form.frontend_repo = "https://github.com/u/f".to_string();
    page.form.set_github_token("tkn");
    page.form.set_backend_repo(0, "https://github.com/u/b");
    page
}

fn project(value: serde_json::Value) -> Project {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_create_sends_exact_payload_and_appends_once() {
    let mock = MockBackend::new(Behaviour::default());
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = demo_page();
    let created = assert_ok!(page.submit(&ctx, &notifier).await);
    let created = created.unwrap();

    let calls = mock.calls_to("POST", "/projects");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].body,
        Some(json!({
            "name": "Demo",
            "frontendRepo": "https://github.com/u/f",
            "backendRepos": ["https://github.com/u/b"],
            "githubToken": "tkn",
        }))
    );
    assert_eq!(calls[0].auth.as_deref(), Some("Bearer tok"));

    assert_eq!(ctx.projects.len(), 1);
    assert_eq!(ctx.projects.get(&created.id).map(|p| p.name), Some("Demo".to_string()));
    assert_eq!(
        notifier.messages(NoticeLevel::Success),
        vec!["Project created successfully!".to_string()]
    );

    // Form is cleared for the next project
    assert!(page.form.name.is_empty());
    assert!(!page.form.has_github_token());
    assert_eq!(page.form.backend_repos(), &["".to_string()]);
}

#[tokio::test]
async fn test_blank_extra_backends_are_not_sent() {
    let mock = MockBackend::new(Behaviour::default());
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = demo_page();
    page.form.add_backend_repo();
    page.form.add_backend_repo();
    page.form.set_backend_repo(2, "https://github.com/u/c");
    assert_ok!(page.submit(&ctx, &notifier).await);

    let body = mock.calls_to("POST", "/projects")[0].body.clone().unwrap();
    assert_eq!(
        body["backendRepos"],
        json!(["https://github.com/u/b", "https://github.com/u/c"])
    );
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let mock = MockBackend::new(Behaviour::default());
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = demo_page();
    page.form.set_github_token("");
    let err = assert_err!(page.submit(&ctx, &notifier).await);
    assert!(matches!(err, QuickOpsError::Validation(ValidationError::MissingToken)));

    let mut insecure = demo_page();
    insecure.form.frontend_repo = "http://github.com/u/f".to_string();
    assert_err!(insecure.submit(&ctx, &notifier).await);

    assert!(mock.calls().is_empty());
    assert!(ctx.projects.is_empty());
    assert_eq!(page.form.name, "Demo");
    assert_eq!(insecure.form.frontend_repo, "http://github.com/u/f");
    assert_eq!(notifier.messages(NoticeLevel::Error).len(), 2);
}

#[tokio::test]
async fn test_create_failure_surfaces_backend_message() {
    let mock = MockBackend::new(Behaviour {
        create_error: Some(json!({ "message": "Repository is private" })),
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = demo_page();
    assert_err!(page.submit(&ctx, &notifier).await);

    assert_eq!(
        notifier.messages(NoticeLevel::Error),
        vec!["Repository is private".to_string()]
    );
    assert!(ctx.projects.is_empty());
    assert_eq!(page.form.name, "Demo");
    assert!(!page.is_submitting());
}

#[tokio::test]
async fn test_deployed_project_cannot_be_deleted() {
    let deployed = project_json("p1", "Demo", "deployed", Some("VM"));
    let mock = MockBackend::new(Behaviour {
        projects: vec![deployed.clone()],
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let err = assert_err!(
        delete_project(&ctx, &project(deployed), &AssumeAnswer(true), &notifier).await
    );
    assert!(matches!(err, QuickOpsError::Rejected(_)));
    assert!(mock.calls_to("DELETE", "/projects/p1").is_empty());
    assert_eq!(
        notifier.messages(NoticeLevel::Error),
        vec!["Deployed projects cannot be deleted".to_string()]
    );
}

#[tokio::test]
async fn test_declined_confirmation_sends_nothing() {
    let fresh = project_json("p1", "Demo", "not deployed", None);
    let mock = MockBackend::new(Behaviour {
        projects: vec![fresh.clone()],
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let deleted = assert_ok!(delete_project(&ctx, &project(fresh), &AssumeAnswer(false), &notifier).await);
    assert!(!deleted);
    assert!(mock.calls().is_empty());
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_delete_removes_from_collection() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![
            project_json("p1", "Demo", "not deployed", None),
            project_json("p2", "Other", "deployed", Some("Kubernetes")),
        ],
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    assert_ok!(ctx.refresh_projects().await);
    assert_eq!(ctx.projects.len(), 2);
    assert!(!ctx.projects.is_loading());

    let target = ctx.projects.get("p1").unwrap();
    let deleted = assert_ok!(delete_project(&ctx, &target, &AssumeAnswer(true), &notifier).await);
    assert!(deleted);

    assert_eq!(mock.calls_to("DELETE", "/projects/p1").len(), 1);
    assert!(ctx.projects.get("p1").is_none());
    assert_eq!(ctx.projects.len(), 1);
    assert_eq!(
        notifier.messages(NoticeLevel::Success),
        vec!["Project deleted successfully!".to_string()]
    );
}
