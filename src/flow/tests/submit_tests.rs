//! Transition tests for `flow submit`.

use crate::flow::{
    adapters::memory::{VcsCommand, VcsOperation},
    domain::{ReviewRequest, Task, TaskStatus},
    services::{SubmitKind, WorkflowError},
};
use rstest::rstest;

use super::harness::{Harness, TASK_BRANCH, branch, task, task_id};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_progress_task_is_pushed_and_sent_for_review() {
    let harness = Harness::on_branch(TASK_BRANCH).with_task(task(TaskStatus::InProgress));

    let outcome = harness.engine.submit().await.expect("submit");

    assert_eq!(outcome.kind(), SubmitKind::SubmittedForReview);
    assert!(outcome.review_requested());
    assert_eq!(harness.commands(), vec![VcsCommand::Push(branch(TASK_BRANCH))]);
    assert_eq!(
        harness.status_writes(),
        vec![(task_id("42"), TaskStatus::InReview)]
    );
    assert_eq!(
        harness.reviews.requests().expect("requests"),
        vec![ReviewRequest::new(branch(TASK_BRANCH), branch("main"))]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_review_task_is_pushed_only() {
    let harness = Harness::on_branch(TASK_BRANCH).with_task(task(TaskStatus::InReview));

    let outcome = harness.engine.submit().await.expect("submit");

    assert_eq!(outcome.kind(), SubmitKind::ReviewUpdated);
    assert!(!outcome.review_requested());
    assert_eq!(harness.commands(), vec![VcsCommand::Push(branch(TASK_BRANCH))]);
    assert!(harness.status_writes().is_empty());
    assert!(harness.reviews.requests().expect("requests").is_empty());
}

#[rstest]
#[case("main")]
#[case("feature/login")]
#[case("hotfix/TASK-42-x")]
#[tokio::test(flavor = "multi_thread")]
async fn non_feature_branch_is_refused(#[case] current: &str) {
    let harness = Harness::on_branch(current).with_task(task(TaskStatus::InProgress));

    let outcome = harness.engine.submit().await.expect("submit");

    assert_eq!(outcome.kind(), SubmitKind::NotFeatureBranch);
    assert_eq!(outcome.message(), format!("{current} is not a feature branch"));
    harness.assert_no_side_effects();
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dirty_tree_blocks_submit() {
    let harness = Harness::on_branch(TASK_BRANCH)
        .with_task(task(TaskStatus::InProgress))
        .dirty();

    let outcome = harness.engine.submit().await.expect("submit");

    assert_eq!(outcome.kind(), SubmitKind::UncommittedChanges);
    assert!(outcome.kind().is_guard_violation());
    harness.assert_no_side_effects();
}

#[rstest]
#[case("feature/TASK-")]
#[case("feature/TASK--no-id")]
#[tokio::test(flavor = "multi_thread")]
async fn feature_branch_without_task_id_is_malformed(#[case] current: &str) {
    let harness = Harness::on_branch(current);

    let result = harness.engine.submit().await;

    assert!(matches!(result, Err(WorkflowError::MalformedBranchName(_))));
    harness.assert_no_side_effects();
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_task_is_reported_as_not_found() {
    let harness = Harness::on_branch(TASK_BRANCH);

    let result = harness.engine.submit().await;

    assert!(matches!(result, Err(WorkflowError::TaskNotFound(_))));
    harness.assert_no_side_effects();
}

#[rstest]
#[case(TaskStatus::Open)]
#[case(TaskStatus::Pending)]
#[case(TaskStatus::Rejected)]
#[case(TaskStatus::Blocked)]
#[case(TaskStatus::Accepted)]
#[case(TaskStatus::Closed)]
#[case(TaskStatus::Completed)]
#[tokio::test(flavor = "multi_thread")]
async fn other_statuses_have_no_submit_transition(#[case] status: TaskStatus) {
    let harness = Harness::on_branch(TASK_BRANCH).with_task(task(status));

    let outcome = harness.engine.submit().await.expect("submit");

    assert_eq!(outcome.kind(), SubmitKind::NoAction(status));
    harness.assert_no_side_effects();
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn branch_with_stale_slug_still_submits() {
    let stale = "feature/TASK-42-old-title";
    let harness = Harness::on_branch(stale).with_task(Task::new(
        task_id("42"),
        "Renamed title",
        TaskStatus::InProgress,
    ));

    let outcome = harness.engine.submit().await.expect("submit");

    assert_eq!(outcome.kind(), SubmitKind::SubmittedForReview);
    assert_eq!(harness.commands(), vec![VcsCommand::Push(branch(stale))]);
    assert_eq!(
        harness.reviews.requests().expect("requests"),
        vec![ReviewRequest::new(branch(stale), branch("main"))]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn push_failure_leaves_status_and_review_untouched() {
    let harness = Harness::on_branch(TASK_BRANCH).with_task(task(TaskStatus::InProgress));
    harness.vcs.fail_on(VcsOperation::Push).expect("inject failure");

    let result = harness.engine.submit().await;

    assert!(matches!(result, Err(WorkflowError::Vcs(_))));
    harness.assert_no_side_effects();
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn checkout_then_submit_walks_the_lifecycle() {
    let harness = Harness::on_branch("main").with_task(task(TaskStatus::Pending));

    harness.engine.checkout("42").await.expect("checkout");
    let submitted = harness.engine.submit().await.expect("first submit");
    let updated = harness.engine.submit().await.expect("second submit");

    assert_eq!(submitted.kind(), SubmitKind::SubmittedForReview);
    assert_eq!(updated.kind(), SubmitKind::ReviewUpdated);
    assert_eq!(
        harness.status_writes(),
        vec![
            (task_id("42"), TaskStatus::InProgress),
            (task_id("42"), TaskStatus::InReview),
        ]
    );
    assert_eq!(harness.reviews.requests().expect("requests").len(), 1);
}
