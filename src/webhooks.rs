pub mod github;
pub use github::{create_jira, create_remote_link};
