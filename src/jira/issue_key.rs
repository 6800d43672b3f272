use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISSUE_KEY: Regex = Regex::new(r"[A-Z]+-[0-9]+").unwrap();
}

/// A JIRA issue key of the form `PROJECT-NUMBER`, e.g. `GJ-42`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueKey(String);

impl IssueKey {
    /// Extracts the issue key referenced by a pull request title.
    ///
    /// Titles mentioning several keys are not disambiguated: the first
    /// occurrence wins.
    pub fn extract(title: &str) -> Option<Self> {
        ISSUE_KEY.find(title).map(|m| Self(m.as_str().to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_key_anywhere_in_title() {
        let key = IssueKey::extract("Fix bug GJ-42").unwrap();
        assert_eq!(key.as_str(), "GJ-42");

        let key = IssueKey::extract("ABC-1: rework login flow").unwrap();
        assert_eq!(key.as_str(), "ABC-1");
    }

    #[test]
    fn first_occurrence_wins() {
        let key = IssueKey::extract("GJ-1 duplicates GJ-2").unwrap();
        assert_eq!(key.as_str(), "GJ-1");
    }

    #[test]
    fn rejects_titles_without_a_key() {
        assert_eq!(IssueKey::extract("Fix typo in README"), None);
        assert_eq!(IssueKey::extract("gj-42 is not a key"), None);
        assert_eq!(IssueKey::extract("GJ- 42"), None);
        assert_eq!(IssueKey::extract(""), None);
    }

    #[test]
    fn key_inside_a_longer_word_still_matches() {
        // the pattern is a substring search, not an anchored match
        let key = IssueKey::extract("revert xGJ-42y").unwrap();
        assert_eq!(key.as_str(), "GJ-42");
    }
}
