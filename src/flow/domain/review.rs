//! Review request value objects.

use super::{BranchName, RepositoryFullName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request to review `head` for merging into `base`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewRequest {
    head: BranchName,
    base: BranchName,
}

impl ReviewRequest {
    /// Creates a review request between two branches.
    #[must_use]
    pub const fn new(head: BranchName, base: BranchName) -> Self {
        Self { head, base }
    }

    /// Returns the branch under review.
    #[must_use]
    pub const fn head(&self) -> &BranchName {
        &self.head
    }

    /// Returns the branch the head would merge into.
    #[must_use]
    pub const fn base(&self) -> &BranchName {
        &self.base
    }

    /// Builds the GitHub compare URL for this request.
    ///
    /// # Examples
    ///
    ///     use taskflow::flow::domain::{BranchName, RepositoryFullName, ReviewRequest};
    ///
    ///     let request = ReviewRequest::new(
    ///         BranchName::new("feature/TASK-7-x").expect("valid"),
    ///         BranchName::new("main").expect("valid"),
    ///     );
    ///     let repo = RepositoryFullName::new("acme/shop").expect("valid");
    ///     assert_eq!(
    ///         request.compare_url(&repo),
    ///         "https://github.com/acme/shop/compare/main...feature/TASK-7-x"
    ///     );
    #[must_use]
    pub fn compare_url(&self, repository: &RepositoryFullName) -> String {
        format!(
            "https://github.com/{repository}/compare/{}...{}",
            self.base, self.head
        )
    }
}

impl fmt::Display for ReviewRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.head, self.base)
    }
}
