use rocket::{
    http::Status,
    serde::json::{json, Json, Value},
    State,
};
use tracing::{error, info, warn};

use crate::jira::{CreateIssueOutcome, IssueKey, JiraClient};

mod events;
pub use events::{IssueCommentPayload, PullRequestPayload};

/// Command a GitHub comment must contain for the relay to open a JIRA issue.
const CREATE_JIRA_COMMAND: &str = "/createjira";

/// Issue-comment deliveries: a `/createjira` command in a comment opens a
/// JIRA issue mirroring the GitHub issue.
#[rocket::post("/createJira", format = "json", data = "<payload>")]
pub async fn create_jira(
    payload: Json<IssueCommentPayload>,
    jira: &State<JiraClient>,
) -> (Status, Value) {
    let (title, description, comment) = match payload.required_fields() {
        Ok(fields) => fields,
        Err(field) => return missing_field(field),
    };

    if !comment.contains(CREATE_JIRA_COMMAND) {
        warn!("command '{}' not found in comment", CREATE_JIRA_COMMAND);
        return (
            Status::BadRequest,
            json!({ "message": format!("Command '{CREATE_JIRA_COMMAND}' not found in comment") }),
        );
    }

    match jira.create_issue(title, description).await {
        Ok(CreateIssueOutcome::Created { key }) => {
            info!("issue created successfully with key: {}", key);
            (
                Status::Created,
                json!({ "message": "Issue created successfully", "issue_key": key }),
            )
        }
        Ok(CreateIssueOutcome::Failed { status, details }) => {
            error!("failed to create issue, JIRA replied {}: {}", status, details);
            (
                Status::new(status.as_u16()),
                json!({ "message": "Failed to create issue", "details": details }),
            )
        }
        Err(err) => jira_unreachable(err),
    }
}

/// Pull-request deliveries: opened and reopened pull requests whose title
/// references an existing JIRA issue get a remote link attached to it.
#[rocket::post("/createRemoteLink", format = "json", data = "<payload>")]
pub async fn create_remote_link(
    payload: Json<PullRequestPayload>,
    jira: &State<JiraClient>,
) -> (Status, Value) {
    let (action, title, html_url) = match payload.required_fields() {
        Ok(fields) => fields,
        Err(field) => return missing_field(field),
    };

    match action {
        "opened" | "reopened" => {
            let key = match IssueKey::extract(title) {
                Some(key) => key,
                None => {
                    error!("invalid JIRA issue key in pull request title: {}", title);
                    return (
                        Status::BadRequest,
                        json!({ "error": "Pull request title must include a valid JIRA issue key." }),
                    );
                }
            };

            match jira.issue_exists(&key).await {
                Ok(true) => {}
                Ok(false) => {
                    warn!("JIRA issue {} does not exist", key);
                    return (
                        Status::BadRequest,
                        json!({ "error": "JIRA issue does not exist." }),
                    );
                }
                Err(err) => return jira_unreachable(err),
            }

            let status = match jira.create_remote_link(&key, title, html_url).await {
                Ok(status) => status,
                Err(err) => return jira_unreachable(err),
            };

            if status == reqwest::StatusCode::UNAUTHORIZED {
                error!("invalid JIRA credentials");
                return (
                    Status::Unauthorized,
                    json!({ "error": "Invalid JIRA credentials." }),
                );
            }

            info!("remote link created for pull request: {}", title);
            (
                Status::new(status.as_u16()),
                json!({ "message": "Remote link created successfully." }),
            )
        }
        "closed" => {
            info!("pull request closed: {}", title);
            (Status::Ok, json!({ "message": "Pull request closed." }))
        }
        "synchronize" => {
            info!("pull request synchronized: {}", title);
            (Status::Ok, json!({ "message": "Pull request synchronized." }))
        }
        action => {
            warn!("unhandled pull request action: {}", action);
            (
                Status::BadRequest,
                json!({ "error": "Unhandled pull request action." }),
            )
        }
    }
}

fn missing_field(field: &str) -> (Status, Value) {
    error!("missing field in payload: {}", field);
    (
        Status::BadRequest,
        json!({ "message": format!("Missing field: {field}") }),
    )
}

fn jira_unreachable(err: anyhow::Error) -> (Status, Value) {
    error!("couldn't reach JIRA: {:#}", err);
    (Status::BadGateway, json!({ "message": "Couldn't reach JIRA" }))
}
