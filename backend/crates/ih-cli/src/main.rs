//! ih - Interview Hub user directory CLI
//!
//! # Examples
//!
//! ```bash
//! # Synchronize an identity
//! ih user sync auth0|123 --email ann@example.com --display-name "Ann Lee"
//!
//! # List everyone, as a known caller
//! ih user list --user-id auth0|123 --pretty
//!
//! # Run the role selection for an identity
//! ih select-role auth0|123 --role interviewer --email ann@example.com --first-name Ann
//! ```

mod cli;
mod commands;
mod user_commands;

use crate::{
    cli::Cli,
    commands::Commands,
    user_commands::{UserCommands, profile},
};

use ih_cli::{CliClientResult, Client, ClientError};
use ih_config::Config;
use ih_core::{IdentityAssertion, Role, RoleReconciliation, SelectionOutcome};

use std::process::ExitCode;

use clap::Parser;
use serde_json::{Value, json};

const FALLBACK_SERVER_URL: &str = "http://127.0.0.1:8000";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // explicit flag or IH_SERVER_URL > config file > fallback
    let server_url = cli.server.unwrap_or_else(configured_server_url);

    let client = Client::new(&server_url, cli.user_id.as_deref(), cli.token.as_deref());

    let result = match cli.command {
        Commands::User { action } => match action {
            UserCommands::Sync {
                external_id,
                email,
                display_name,
                avatar_url,
            } => {
                client
                    .sync_user(&profile(external_id, email, display_name, avatar_url))
                    .await
            }
            UserCommands::Profile {
                external_id,
                email,
                display_name,
                avatar_url,
            } => {
                client
                    .refresh_profile(&profile(external_id, email, display_name, avatar_url))
                    .await
            }
            UserCommands::SetRole { external_id, role } => {
                client.assign_role(&external_id, role).await
            }
            UserCommands::List => client.list_users().await,
            UserCommands::Get { external_id } => client.get_user(&external_id).await,
        },

        Commands::Status { subject } => status(client, &subject).await,

        Commands::SelectRole {
            subject,
            role,
            email,
            first_name,
            last_name,
            avatar_url,
        } => {
            let mut identity = IdentityAssertion::new(subject);
            identity.primary_email = email;
            identity.first_name = first_name;
            identity.last_name = last_name;
            identity.avatar_url = avatar_url;

            select_role(client, &identity, role).await
        }
    };

    match result {
        Ok(json) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&json)
            } else {
                serde_json::to_string(&json)
            };
            match output {
                Ok(s) => {
                    println!("{}", s);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing output: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            match &e {
                ClientError::Api { code, message, .. } => {
                    eprintln!("Error [{}]: {}", code, message);
                }
                _ => eprintln!("Error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn status(client: Client, subject: &str) -> CliClientResult<Value> {
    let mut workflow = RoleReconciliation::new(client);
    let state = workflow.refresh(subject).await?;

    Ok(json!({ "subject": subject, "reconciliation": state }))
}

/// A session that already resolved keeps its role; selection only runs
/// while the identity has no stored role.
async fn select_role(
    client: Client,
    identity: &IdentityAssertion,
    role: Role,
) -> CliClientResult<Value> {
    let mut workflow = RoleReconciliation::new(client);
    let state = workflow.refresh(&identity.subject_id).await?;

    let outcome = if state.is_resolved() {
        "already_resolved"
    } else {
        match workflow.select_role(identity, role).await? {
            SelectionOutcome::Resolved(_) => "resolved",
            SelectionOutcome::Aborted => "aborted",
        }
    };

    Ok(json!({
        "subject": identity.subject_id,
        "outcome": outcome,
        "reconciliation": workflow.state(),
    }))
}

/// Reads the server section only when a config directory already exists
fn configured_server_url() -> String {
    let has_config = Config::config_dir().is_ok_and(|dir| dir.exists());
    if !has_config {
        return String::from(FALLBACK_SERVER_URL);
    }

    match Config::load() {
        Ok(config) if config.server.port != 0 => {
            let host = match config.server.host.as_str() {
                "0.0.0.0" | "::" => "127.0.0.1",
                host => host,
            };
            format!("http://{}:{}", host, config.server.port)
        }
        _ => String::from(FALLBACK_SERVER_URL),
    }
}
