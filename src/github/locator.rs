//! Identity wrappers for the repository and pull request under validation.

use std::fmt;

use super::error::GateError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, GateError> {
        if value.is_empty() {
            return Err(GateError::InvalidRepository(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, GateError> {
        if value.is_empty() {
            return Err(GateError::InvalidRepository(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Validates that the number is positive.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidPullRequestNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, GateError> {
        if value == 0 {
            return Err(GateError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `GateError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, GateError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GateError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// Owner and name of a GitHub repository.
///
/// # Example
///
/// ```
/// use issuegate::RepositoryLocator;
///
/// let locator = RepositoryLocator::from_full_name("octo/repo")
///     .expect("should parse full name");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a repository locator from owner and repository name strings.
    ///
    /// # Errors
    ///
    /// Returns `GateError::InvalidRepository` when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, GateError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
        })
    }

    /// Parses a repository full name in the form `<owner>/<repo>`.
    ///
    /// # Errors
    ///
    /// Returns `GateError::InvalidRepository` when the value does not contain
    /// exactly one separator or either half is empty.
    pub fn from_full_name(full_name: &str) -> Result<Self, GateError> {
        let invalid = || GateError::InvalidRepository(full_name.to_owned());
        let (owner, repo) = full_name.trim().split_once('/').ok_or_else(invalid)?;
        if repo.contains('/') {
            return Err(invalid());
        }
        Self::from_owner_repo(owner, repo).map_err(|_| invalid())
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns true when `owner/repo` names this repository.
    ///
    /// GitHub treats owner and repository names case-insensitively.
    #[must_use]
    pub fn is_named(&self, owner: &str, repo: &str) -> bool {
        self.owner.as_str().eq_ignore_ascii_case(owner)
            && self.repository.as_str().eq_ignore_ascii_case(repo)
    }

    pub(crate) fn repository_path(&self) -> String {
        format!(
            "/repos/{}/{}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    pub(crate) fn issue_path(&self, issue_number: u64) -> String {
        format!("{}/issues/{issue_number}", self.repository_path())
    }
}

impl fmt::Display for RepositoryLocator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}/{}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}

/// Base repository and number of a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    repository: RepositoryLocator,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Creates a locator for pull request `number` in `repository`.
    #[must_use]
    pub const fn new(repository: RepositoryLocator, number: PullRequestNumber) -> Self {
        Self { repository, number }
    }

    /// Base repository of the pull request.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryLocator {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn pull_request_path(&self) -> String {
        format!(
            "{}/pulls/{}",
            self.repository.repository_path(),
            self.number.get()
        )
    }

    pub(crate) fn commits_path(&self) -> String {
        format!("{}/commits", self.pull_request_path())
    }

    pub(crate) fn comments_path(&self) -> String {
        format!("{}/comments", self.repository.issue_path(self.number.get()))
    }
}

impl fmt::Display for PullRequestLocator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}{}", self.repository, self.number)
    }
}
