use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::RelayConfig;

mod issue_key;
pub use issue_key::IssueKey;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const GITHUB_FAVICON: &str = "https://github.com/favicon.ico";

/// Client for the three JIRA REST calls the relay performs: issue lookup,
/// issue creation and remote-link creation.
///
/// Credentials and project metadata are fixed at startup; the underlying
/// [`reqwest::Client`] is shared by all inbound requests. Every call runs
/// under a fixed timeout, and a call that doesn't come back in time is a hard
/// failure reported to the webhook caller, never retried.
pub struct JiraClient {
    http: reqwest::Client,
    base_url: Url,
    email: String,
    api_token: String,
    project_key: String,
    issue_type_id: String,
}

/// Outcome of an issue-creation call: either the key JIRA assigned, or the
/// upstream failure to pass back to the webhook caller verbatim.
#[derive(Debug)]
pub enum CreateIssueOutcome {
    Created { key: String },
    Failed { status: StatusCode, details: Value },
}

impl JiraClient {
    pub fn new(config: &RelayConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("couldn't build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.jira_base_url.clone(),
            email: config.jira_email.clone(),
            api_token: config.jira_api_token.clone(),
            project_key: config.jira_project_key.clone(),
            issue_type_id: config.jira_issue_type_id.clone(),
        })
    }

    fn issue_api(&self, suffix: &str) -> String {
        format!(
            "{}/rest/api/3/issue{}",
            self.base_url.as_str().trim_end_matches('/'),
            suffix
        )
    }

    /// Checks whether `key` resolves to an existing issue.
    ///
    /// Only an explicit 200 counts as "found". Any other status maps to
    /// `false`, auth failures included, so a `false` can also mean "couldn't
    /// check" rather than "does not exist".
    pub async fn issue_exists(&self, key: &IssueKey) -> anyhow::Result<bool> {
        let response = self
            .http
            .get(self.issue_api(&format!("/{key}")))
            .basic_auth(&self.email, Some(&self.api_token))
            .send()
            .await
            .with_context(|| format!("couldn't query JIRA for issue {key}"))?;

        Ok(response.status() == StatusCode::OK)
    }

    /// Creates an issue holding `summary` and a plain-text `description`,
    /// under the project key and issue type the relay was configured with.
    pub async fn create_issue(
        &self,
        summary: &str,
        description: &str,
    ) -> anyhow::Result<CreateIssueOutcome> {
        let payload = CreateIssueRequest {
            fields: IssueFields {
                summary,
                description: Document::paragraph(description),
                issuetype: IssueType {
                    id: &self.issue_type_id,
                },
                project: Project {
                    key: &self.project_key,
                },
            },
        };

        let response = self
            .http
            .post(self.issue_api(""))
            .basic_auth(&self.email, Some(&self.api_token))
            .json(&payload)
            .send()
            .await
            .context("couldn't submit issue creation to JIRA")?;

        let status = response.status();
        if status == StatusCode::CREATED {
            let created: CreatedIssue = response
                .json()
                .await
                .context("couldn't decode JIRA issue creation reply")?;
            Ok(CreateIssueOutcome::Created { key: created.key })
        } else {
            let details = response.json().await.unwrap_or(Value::Null);
            Ok(CreateIssueOutcome::Failed { status, details })
        }
    }

    /// Attaches a remote link pointing at `url` to the given issue.
    ///
    /// Returns the upstream status for the caller to interpret; a 401 means
    /// the configured credentials were rejected.
    pub async fn create_remote_link(
        &self,
        key: &IssueKey,
        title: &str,
        url: &Url,
    ) -> anyhow::Result<StatusCode> {
        let payload = RemoteLinkRequest {
            object: LinkObject {
                icon: LinkIcon {
                    url16x16: GITHUB_FAVICON,
                },
                title,
                url,
            },
        };

        let response = self
            .http
            .post(self.issue_api(&format!("/{key}/remotelink")))
            .basic_auth(&self.email, Some(&self.api_token))
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("couldn't submit remote link for issue {key}"))?;

        Ok(response.status())
    }
}

#[derive(Serialize)]
struct CreateIssueRequest<'a> {
    fields: IssueFields<'a>,
}

#[derive(Serialize)]
struct IssueFields<'a> {
    summary: &'a str,
    description: Document<'a>,
    issuetype: IssueType<'a>,
    project: Project<'a>,
}

#[derive(Serialize)]
struct IssueType<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct Project<'a> {
    key: &'a str,
}

/// Minimal Atlassian document, just enough to carry a plain-text description.
#[derive(Serialize)]
struct Document<'a> {
    r#type: &'static str,
    version: u8,
    content: Vec<Node<'a>>,
}

#[derive(Serialize)]
struct Node<'a> {
    r#type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    content: Vec<Node<'a>>,
}

impl<'a> Document<'a> {
    fn paragraph(text: &'a str) -> Self {
        Document {
            r#type: "doc",
            version: 1,
            content: vec![Node {
                r#type: "paragraph",
                text: None,
                content: vec![Node {
                    r#type: "text",
                    text: Some(text),
                    content: vec![],
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedIssue {
    key: String,
}

#[derive(Serialize)]
struct RemoteLinkRequest<'a> {
    object: LinkObject<'a>,
}

#[derive(Serialize)]
struct LinkObject<'a> {
    icon: LinkIcon,
    title: &'a str,
    url: &'a Url,
}

#[derive(Serialize)]
struct LinkIcon {
    url16x16: &'static str,
}
