use serde::Deserialize;
use url::Url;

/// Payload of an `issue_comment` webhook delivery, reduced to the fields the
/// relay consumes.
///
/// Every field is optional at the serde level so that an incomplete delivery
/// is reported per field instead of surfacing as an opaque parse error.
#[derive(Debug, Deserialize)]
pub struct IssueCommentPayload {
    pub issue: Option<Issue>,
    pub comment: Option<Comment>,
}

#[derive(Debug, Deserialize)]
pub struct Issue {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Comment {
    pub body: Option<String>,
}

impl IssueCommentPayload {
    /// Returns the (title, description, comment) triple the creation flow
    /// needs, or the path of the first missing field.
    pub fn required_fields(&self) -> Result<(&str, &str, &str), &'static str> {
        let issue = self.issue.as_ref().ok_or("issue")?;
        let title = issue.title.as_deref().ok_or("issue.title")?;
        let body = issue.body.as_deref().ok_or("issue.body")?;
        let comment = self
            .comment
            .as_ref()
            .and_then(|comment| comment.body.as_deref())
            .ok_or("comment.body")?;
        Ok((title, body, comment))
    }
}

/// Payload of a `pull_request` webhook delivery.
#[derive(Debug, Deserialize)]
pub struct PullRequestPayload {
    pub action: Option<String>,
    pub pull_request: Option<PullRequest>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub title: Option<String>,
    pub html_url: Option<Url>,
}

impl PullRequestPayload {
    /// Returns the (action, title, html_url) triple the link flow needs, or
    /// the path of the first missing field.
    pub fn required_fields(&self) -> Result<(&str, &str, &Url), &'static str> {
        let action = self.action.as_deref().ok_or("action")?;
        let pull_request = self.pull_request.as_ref().ok_or("pull_request")?;
        let title = pull_request.title.as_deref().ok_or("pull_request.title")?;
        let html_url = pull_request
            .html_url
            .as_ref()
            .ok_or("pull_request.html_url")?;
        Ok((action, title, html_url))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn issue_comment_accepts_extra_fields() {
        let payload: IssueCommentPayload = serde_json::from_value(json!({
            "action": "created",
            "issue": { "title": "Login broken", "body": "Cannot log in", "number": 3 },
            "comment": { "body": "/createjira", "user": { "login": "octocat" } },
        }))
        .unwrap();

        let (title, body, comment) = payload.required_fields().unwrap();
        assert_eq!(title, "Login broken");
        assert_eq!(body, "Cannot log in");
        assert_eq!(comment, "/createjira");
    }

    #[test]
    fn issue_comment_reports_first_missing_field() {
        let payload: IssueCommentPayload = serde_json::from_value(json!({
            "comment": { "body": "/createjira" },
        }))
        .unwrap();
        assert_eq!(payload.required_fields(), Err("issue"));

        let payload: IssueCommentPayload = serde_json::from_value(json!({
            "issue": { "body": "Cannot log in" },
            "comment": { "body": "/createjira" },
        }))
        .unwrap();
        assert_eq!(payload.required_fields(), Err("issue.title"));

        // GitHub sends an explicit null for empty issue bodies
        let payload: IssueCommentPayload = serde_json::from_value(json!({
            "issue": { "title": "Login broken", "body": null },
            "comment": { "body": "/createjira" },
        }))
        .unwrap();
        assert_eq!(payload.required_fields(), Err("issue.body"));

        let payload: IssueCommentPayload = serde_json::from_value(json!({
            "issue": { "title": "Login broken", "body": "Cannot log in" },
        }))
        .unwrap();
        assert_eq!(payload.required_fields(), Err("comment.body"));
    }

    #[test]
    fn pull_request_reports_first_missing_field() {
        let payload: PullRequestPayload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(payload.required_fields(), Err("action"));

        let payload: PullRequestPayload = serde_json::from_value(json!({
            "action": "opened",
        }))
        .unwrap();
        assert_eq!(payload.required_fields(), Err("pull_request"));

        let payload: PullRequestPayload = serde_json::from_value(json!({
            "action": "opened",
            "pull_request": { "html_url": "https://github.com/acme/widgets/pull/17" },
        }))
        .unwrap();
        assert_eq!(payload.required_fields(), Err("pull_request.title"));
    }
}
