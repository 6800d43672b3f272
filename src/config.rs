use clap::Parser;
use url::Url;

/// Relays GitHub pull-request and issue-comment webhooks to a JIRA tracker.
///
/// Every option can also be supplied through the environment, which is how the
/// relay is expected to be configured when deployed.
#[derive(Debug, Parser)]
#[command(version)]
pub struct RelayConfig {
    /// Base URL of the JIRA site the relay talks to, e.g. `https://example.atlassian.net`
    #[arg(long, env = "JIRA_BASE_URL")]
    pub jira_base_url: Url,
    /// Account email used for basic auth against the JIRA REST API
    #[arg(long, env = "JIRA_EMAIL")]
    pub jira_email: String,
    /// API token paired with the account email
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub jira_api_token: String,
    /// Key of the project created issues land in
    #[arg(long, env = "JIRA_PROJECT_KEY", default_value = "GJ")]
    pub jira_project_key: String,
    /// Numeric id of the issue type used for created issues
    #[arg(long, env = "JIRA_ISSUE_TYPE_ID", default_value = "10011")]
    pub jira_issue_type_id: String,
    /// Port the webhook receiver listens on
    #[arg(long, env = "PORT", default_value_t = 9000)]
    pub port: u16,
}
