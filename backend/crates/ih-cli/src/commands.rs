use crate::user_commands::UserCommands;

use ih_core::Role;

use std::str::FromStr;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// User directory operations
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Show how the role of an identity currently reconciles
    Status {
        /// External identity id (subject of the identity provider)
        subject: String,
    },

    /// Pick a role for an identity: synchronize, then assign
    SelectRole {
        /// External identity id (subject of the identity provider)
        subject: String,

        /// interviewer or candidate
        #[arg(long, value_parser = parse_role)]
        role: Role,

        /// Primary email; selection is skipped without one
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        avatar_url: Option<String>,
    },
}

pub(crate) fn parse_role(value: &str) -> Result<Role, String> {
    Role::from_str(value).map_err(|e| e.to_string())
}
