use anyhow::Context;
use clap::Parser;
use rocket::routes;

mod config;
use config::RelayConfig;

mod jira;
use jira::JiraClient;

mod webhooks;
use webhooks::{create_jira, create_remote_link};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = RelayConfig::parse();
    let jira = JiraClient::new(&config).context("failed to create JIRA client")?;

    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", config.port));

    let rocket = rocket::custom(figment)
        .mount("/", routes![create_jira, create_remote_link])
        .manage(jira);
    rocket
        .launch()
        .await
        .map_err(|err| anyhow::anyhow!(err))
        .map(|_| ())
}
