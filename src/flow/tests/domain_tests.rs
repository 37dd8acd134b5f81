//! Unit tests for branch identity and task status parsing.

use crate::flow::domain::{
    BranchName, FlowDomainError, RepositoryFullName, ReviewRequest, Task, TaskId, TaskStatus,
    task_id_from_branch,
};
use rstest::rstest;

use super::harness::{TASK_BRANCH, TASK_TITLE, branch, task_id};

fn branch_for(id: &str, title: &str) -> BranchName {
    BranchName::for_task(&Task::new(task_id(id), title, TaskStatus::Pending))
}

#[rstest]
fn branch_name_keeps_first_four_title_words() {
    assert_eq!(branch_for("42", TASK_TITLE).as_str(), TASK_BRANCH);
}

#[rstest]
#[case("", "feature/TASK-7-")]
#[case("   ", "feature/TASK-7-")]
#[case("Single", "feature/TASK-7-Single")]
#[case("two  spaced\twords", "feature/TASK-7-two-spaced-words")]
#[case("Ünïcode título ünico ñ extra", "feature/TASK-7-Ünïcode-título-ünico-ñ")]
#[case("fix: (urgent) crash! now please", "feature/TASK-7-fix:-(urgent)-crash!-now")]
#[case("already-hyphenated title words here", "feature/TASK-7-already-hyphenated-title-words-here")]
fn branch_name_is_total_over_titles(#[case] title: &str, #[case] expected: &str) {
    assert_eq!(branch_for("7", title).as_str(), expected);
}

#[rstest]
#[case("42", TASK_TITLE)]
#[case("86c0ab1xy", "")]
#[case("9", "multi-part-hyphen title with many many words")]
#[case("abc", "ünïcode - dash - separated")]
fn branch_name_round_trips_task_id(#[case] id: &str, #[case] title: &str) {
    let derived = branch_for(id, title);
    assert_eq!(derived.task_id(), Some(task_id(id)));
    assert!(derived.is_feature_branch());
}

#[rstest]
#[case("main")]
#[case("feature/login")]
#[case("feature/task-42-lowercase")]
#[case("bugfix/TASK-42-x")]
#[case("feature/TASK--missing-id")]
#[case("feature/TASK-")]
fn task_id_from_branch_rejects_non_task_branches(#[case] name: &str) {
    assert_eq!(task_id_from_branch(name), None);
}

#[rstest]
#[case("feature/TASK-42", "42")]
#[case("feature/TASK-42-", "42")]
#[case("feature/TASK-42-a-b-c-d", "42")]
fn task_id_from_branch_reads_token_before_next_hyphen(#[case] name: &str, #[case] id: &str) {
    assert_eq!(task_id_from_branch(name), Some(task_id(id)));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("4-2")]
#[case("4 2")]
fn task_id_rejects_reserved_characters(#[case] raw: &str) {
    assert_eq!(
        TaskId::new(raw),
        Err(FlowDomainError::InvalidTaskId(raw.to_owned()))
    );
}

#[rstest]
fn task_id_trims_surrounding_whitespace() {
    assert_eq!(task_id(" 42 ").as_str(), "42");
}

#[rstest]
#[case("")]
#[case("has space")]
fn branch_name_rejects_empty_and_whitespace(#[case] raw: &str) {
    assert!(BranchName::new(raw).is_err());
}

#[rstest]
#[case("open", TaskStatus::Open)]
#[case("PENDING", TaskStatus::Pending)]
#[case("in progress", TaskStatus::InProgress)]
#[case("IN_PROGRESS", TaskStatus::InProgress)]
#[case("in-review", TaskStatus::InReview)]
#[case("Rejected", TaskStatus::Rejected)]
#[case("blocked", TaskStatus::Blocked)]
#[case("accepted", TaskStatus::Accepted)]
#[case(" closed ", TaskStatus::Closed)]
#[case("complete", TaskStatus::Completed)]
#[case("COMPLETED", TaskStatus::Completed)]
fn task_status_parses_tracker_labels(#[case] label: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(label), Ok(expected));
}

#[rstest]
fn task_status_rejects_unknown_label() {
    assert!(TaskStatus::try_from("to do").is_err());
}

#[rstest]
fn task_status_labels_parse_back() {
    for status in TaskStatus::ALL {
        assert_eq!(TaskStatus::try_from(status.label()), Ok(status));
        assert_eq!(TaskStatus::try_from(status.as_str()), Ok(status));
    }
}

#[rstest]
fn only_accepted_and_closed_are_terminal() {
    let terminal: Vec<_> = TaskStatus::ALL
        .into_iter()
        .filter(|status| status.is_terminal())
        .collect();
    assert_eq!(terminal, vec![TaskStatus::Accepted, TaskStatus::Closed]);
}

#[rstest]
#[case("https://github.com/CloudImpl-Inc/beeplk.git", "CloudImpl-Inc", "beeplk")]
#[case("https://github.com/acme/shop", "acme", "shop")]
#[case("https://github.com/acme/shop/", "acme", "shop")]
#[case("git@github.com:acme/shop.git", "acme", "shop")]
fn repository_is_derived_from_clone_url(
    #[case] url: &str,
    #[case] owner: &str,
    #[case] repo: &str,
) {
    let repository = RepositoryFullName::from_clone_url(url).expect("derivable repository");
    assert_eq!(repository.owner(), owner);
    assert_eq!(repository.repo(), repo);
}

#[rstest]
#[case("shop")]
#[case("")]
fn clone_url_without_owner_is_rejected(#[case] url: &str) {
    assert_eq!(
        RepositoryFullName::from_clone_url(url),
        Err(FlowDomainError::InvalidCloneUrl(url.to_owned()))
    );
}

#[rstest]
fn review_request_builds_compare_url() {
    let request = ReviewRequest::new(branch(TASK_BRANCH), branch("main"));
    let repository = RepositoryFullName::new("acme/shop").expect("valid repository");
    assert_eq!(
        request.compare_url(&repository),
        format!("https://github.com/acme/shop/compare/main...{TASK_BRANCH}")
    );
}
