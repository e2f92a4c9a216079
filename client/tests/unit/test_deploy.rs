//! Deploy trigger, build status view and settle polling against a mock backend

mod support;

use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};

use openapi_client::models::{BuildStatus, DeploymentChoice, ProjectStatus};
use quickops::deploy::fsm::{ViewState, LOG_FETCH_FAILED, NO_LOGS_FOUND};
use quickops::notify::NoticeLevel;
use quickops::pages::detail::ProjectDetailPage;

use support::{project_json, signed_in_context, Behaviour, MockBackend, RecordingNotifier};

fn failed_build() -> Value {
    json!({
        "status": "FAILED",
        "stages": [
            { "id": "1", "name": "Build", "status": "SUCCESS" },
            { "id": "2", "name": "Deploy", "status": "FAILED" },
        ],
        "buildId": 42,
    })
}

fn running_build() -> Value {
    json!({
        "status": "IN_PROGRESS",
        "stages": [{ "id": "1", "name": "Build", "status": "IN_PROGRESS" }],
        "buildId": "7",
    })
}

#[tokio::test]
async fn test_deploy_stores_choice_before_triggering() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        deploy_response: running_build(),
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert_ok!(page.select_target(DeploymentChoice::Kubernetes));
    assert!(assert_ok!(page.deploy(&ctx, &notifier).await));

    let writes = mock.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!((writes[0].method.as_str(), writes[0].path.as_str()), ("PUT", "/projects/p1"));
    assert_eq!(writes[0].body, Some(json!({ "deploymentChoice": "Kubernetes" })));
    assert_eq!((writes[1].method.as_str(), writes[1].path.as_str()), ("POST", "/deploy"));
    assert_eq!(writes[1].body, Some(json!({ "id": "p1" })));

    let modal = page.modal().unwrap();
    assert_eq!(modal.state(), ViewState::InProgress);
    assert_eq!(modal.fsm().stages()[0].name, "Build");
    assert_eq!(modal.fsm().build_id(), Some("7"));
    assert!(page.is_submitting());
    assert_eq!(
        notifier.messages(NoticeLevel::Success),
        vec!["Deployment started successfully!".to_string()]
    );

    // A second trigger while one is in flight is ignored
    assert!(!assert_ok!(page.deploy(&ctx, &notifier).await));
    assert_eq!(mock.writes().len(), 2);
}

#[tokio::test]
async fn test_deploy_without_target_is_a_no_op() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert!(!assert_ok!(page.deploy(&ctx, &notifier).await));

    assert!(mock.writes().is_empty());
    assert!(page.modal().is_none());
    assert!(!page.is_submitting());
}

#[tokio::test]
async fn test_deployed_project_redeploys_with_stored_choice() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![project_json("p1", "Demo", "deployed", Some("VM"))],
        deploy_response: running_build(),
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert_err!(page.select_target(DeploymentChoice::Kubernetes));
    assert!(page.render().contains("[Update]"));

    assert!(assert_ok!(page.deploy(&ctx, &notifier).await));
    assert_eq!(mock.writes()[0].body, Some(json!({ "deploymentChoice": "VM" })));
    assert!(page.render().contains("[Updating...]"));
}

#[tokio::test]
async fn test_trigger_failure_keeps_view_closed() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        fail_deploy: true,
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert_ok!(page.select_target(DeploymentChoice::Vm));
    assert_err!(page.deploy(&ctx, &notifier).await);

    assert!(page.modal().is_none());
    assert!(!page.is_submitting());
    assert_eq!(
        notifier.messages(NoticeLevel::Error),
        vec!["Failed to start deployment".to_string()]
    );
}

#[tokio::test]
async fn test_update_failure_skips_trigger() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        fail_update: true,
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert_ok!(page.select_target(DeploymentChoice::Vm));
    assert_err!(page.deploy(&ctx, &notifier).await);

    assert!(mock.calls_to("POST", "/deploy").is_empty());
    assert!(page.modal().is_none());
}

#[tokio::test]
async fn test_error_log_fetched_once() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        deploy_response: failed_build(),
        log: Some("npm ERR! missing script: build".to_string()),
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert_ok!(page.select_target(DeploymentChoice::Vm));
    assert_ok!(page.deploy(&ctx, &notifier).await);
    assert_eq!(page.modal().unwrap().state(), ViewState::Failed);
    assert!(page.render().contains("Show error details for: Deploy"));

    assert_ok!(page.toggle_error_details(&ctx).await);
    assert_ok!(page.toggle_error_details(&ctx).await);
    assert_ok!(page.toggle_error_details(&ctx).await);

    let fetches = mock.calls_to("GET", "/logs/full/Demo/42");
    assert_eq!(fetches.len(), 1);
    assert_eq!(fetches[0].auth.as_deref(), Some("Bearer tok"));

    let modal = page.modal().unwrap();
    assert!(modal.fsm().is_error_expanded());
    assert_eq!(modal.fsm().error_log(), Some("npm ERR! missing script: build"));
}

#[tokio::test]
async fn test_error_log_failure_shows_placeholder() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        deploy_response: failed_build(),
        fail_logs: true,
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert_ok!(page.select_target(DeploymentChoice::Vm));
    assert_ok!(page.deploy(&ctx, &notifier).await);

    assert_ok!(page.toggle_error_details(&ctx).await);
    assert_eq!(page.modal().unwrap().fsm().error_log(), Some(LOG_FETCH_FAILED));
    assert!(page.render().contains("Failed to fetch error logs."));
    assert_eq!(mock.calls_to("GET", "/logs/full/Demo/42").len(), 1);
}

#[tokio::test]
async fn test_settle_marks_build_successful() {
    let mut behaviour = Behaviour {
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        deploy_response: running_build(),
        ..Default::default()
    };
    // load, then two settle polls
    behaviour.status_sequence = ["not deployed", "deploying", "deployed"]
        .into_iter()
        .map(str::to_string)
        .collect();
    let mock = MockBackend::new(behaviour);
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert_ok!(page.select_target(DeploymentChoice::Kubernetes));
    assert_ok!(page.deploy(&ctx, &notifier).await);

    let outcome = assert_ok!(page.settle(&ctx, |_| async {}).await);
    assert!(outcome.settled);
    assert_eq!(outcome.polls, 2);

    let modal = page.modal().unwrap();
    assert_eq!(modal.state(), ViewState::Success);
    assert_eq!(modal.fsm().status(), &BuildStatus::Success);
    assert_eq!(modal.fsm().stages()[0].status, BuildStatus::InProgress);

    assert!(!page.is_submitting());
    assert_eq!(page.project().map(|p| p.status), Some(ProjectStatus::Deployed));
    assert_eq!(
        ctx.projects.get("p1").map(|p| p.status),
        Some(ProjectStatus::Deployed)
    );
    assert_eq!(mock.calls_to("GET", "/projects").len(), 1);
}

#[tokio::test]
async fn test_settle_gives_up_after_poll_budget() {
    let mut behaviour = Behaviour {
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        deploy_response: running_build(),
        ..Default::default()
    };
    behaviour.status_sequence = std::iter::repeat("deploying".to_string()).take(10).collect();
    let mock = MockBackend::new(behaviour);
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert_ok!(page.select_target(DeploymentChoice::Vm));
    assert_ok!(page.deploy(&ctx, &notifier).await);

    let outcome = assert_ok!(page.settle(&ctx, |_| async {}).await);
    assert!(!outcome.settled);
    assert_eq!(outcome.polls, 5);
    assert_eq!(page.modal().unwrap().state(), ViewState::InProgress);
    assert!(!page.is_submitting());
}

#[tokio::test]
async fn test_settle_after_failed_build_refreshes_once() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        deploy_response: failed_build(),
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert_ok!(page.select_target(DeploymentChoice::Vm));
    assert_ok!(page.deploy(&ctx, &notifier).await);
    assert_eq!(page.modal().unwrap().state(), ViewState::Failed);

    let outcome = assert_ok!(page.settle(&ctx, |_| async {}).await);
    assert!(outcome.settled);
    assert_eq!(outcome.polls, 1);
    assert_eq!(outcome.project.status, ProjectStatus::NotDeployed);

    // load plus the single refresh
    assert_eq!(mock.calls_to("GET", "/projects/p1").len(), 2);
    assert_eq!(page.modal().unwrap().state(), ViewState::Failed);
    assert!(!page.is_submitting());
}

#[tokio::test]
async fn test_failed_build_without_failed_stage_shows_no_logs() {
    let mock = MockBackend::new(Behaviour {
        projects: vec![project_json("p1", "Demo", "not deployed", None)],
        deploy_response: json!({
            "status": "FAILED",
            "stages": [{ "id": "1", "name": "Build", "status": "SUCCESS" }],
            "buildId": 8,
        }),
        ..Default::default()
    });
    let ctx = signed_in_context(&mock.start().await).await;
    let notifier = RecordingNotifier::default();

    let mut page = ProjectDetailPage::new("p1");
    assert_ok!(page.load(&ctx, &notifier).await);
    assert_ok!(page.select_target(DeploymentChoice::Vm));
    assert_ok!(page.deploy(&ctx, &notifier).await);

    assert_ok!(page.toggle_error_details(&ctx).await);
    let rendered = page.render();
    assert!(rendered.contains("Show error details for: Unknown stage"));
    assert!(rendered.contains(NO_LOGS_FOUND));
    assert!(!rendered.contains("Loading logs..."));
    assert!(mock.calls_to("GET", "/logs/full/Demo/8").is_empty());
}
