//! Closing-keyword parsing for pull request descriptions and commit messages.
//!
//! GitHub links an issue when text such as `Fixes #42` appears in a pull
//! request. Two grammars are recognised here:
//!
//! - the scan grammar: keyword, whitespace, `#<number>`;
//! - the reference grammar: keyword, colon or whitespace, then `#<number>` or
//!   `<owner>/<repo>#<number>`.
//!
//! Keywords match case-insensitively and only as whole words, so `prefix #1`
//! is not read as `fix #1`.

use std::sync::LazyLock;

use regex::Regex;

use crate::github::locator::RepositoryLocator;

static CLOSING_KEYWORD: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:close|closes|closed|fix|fixes|fixed|resolve|resolves|resolved)\s+#(?P<number>\d+)")
        .ok()
});

static ISSUE_REFERENCE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:close|closes|closed|fix|fixes|fixed|resolve|resolves|resolved)(?::\s*|\s+)(?:(?P<repository>[a-z0-9][a-z0-9-]*/[a-z0-9._-]+))?#(?P<number>\d+)",
    )
    .ok()
});

/// An issue reference found after a closing keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReference {
    /// `owner/repo` when the reference names a repository explicitly.
    pub repository: Option<String>,
    /// Referenced issue number.
    pub number: u64,
}

impl IssueReference {
    /// Returns true when the reference points into `repository`: either it
    /// names no repository or it names this one.
    #[must_use]
    pub fn points_into(&self, repository: &RepositoryLocator) -> bool {
        self.repository.as_deref().is_none_or(|full_name| {
            full_name
                .split_once('/')
                .is_some_and(|(owner, repo)| repository.is_named(owner, repo))
        })
    }
}

/// Collects every issue number that follows a closing keyword in `texts`.
///
/// Numbers are deduplicated, keeping the position of their first occurrence.
pub fn closing_issue_numbers<'text>(texts: impl IntoIterator<Item = &'text str>) -> Vec<u64> {
    let Some(pattern) = CLOSING_KEYWORD.as_ref() else {
        return Vec::new();
    };

    let mut numbers: Vec<u64> = Vec::new();
    for text in texts {
        let found = pattern
            .captures_iter(text)
            .filter_map(|captures| captures.name("number"))
            .filter_map(|number| number.as_str().parse::<u64>().ok());
        for number in found {
            if !numbers.contains(&number) {
                numbers.push(number);
            }
        }
    }
    numbers
}

/// Finds the first closing-keyword issue reference in `text`.
///
/// A bare `owner/repo#N` without a keyword is not a reference.
#[must_use]
pub fn first_issue_reference(text: &str) -> Option<IssueReference> {
    let pattern = ISSUE_REFERENCE.as_ref()?;
    pattern.captures_iter(text).find_map(|captures| {
        let number = captures.name("number")?.as_str().parse::<u64>().ok()?;
        Some(IssueReference {
            repository: captures
                .name("repository")
                .map(|repository| repository.as_str().to_owned()),
            number,
        })
    })
}
