use crate::commands::parse_role;

use ih_core::{Role, SyncProfile};

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum UserCommands {
    /// Create the record for an identity if it does not exist yet
    Sync {
        external_id: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        display_name: String,

        #[arg(long)]
        avatar_url: Option<String>,
    },

    /// Overwrite display name, email and avatar; the role is kept
    Profile {
        external_id: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        display_name: String,

        #[arg(long)]
        avatar_url: Option<String>,
    },

    /// Set the role of an existing record
    SetRole {
        external_id: String,

        /// interviewer or candidate
        #[arg(long, value_parser = parse_role)]
        role: Role,
    },

    /// List every user (requires a caller identity)
    List,

    /// Get one user by external identity id
    Get { external_id: String },
}

pub(crate) fn profile(
    external_id: String,
    email: String,
    display_name: String,
    avatar_url: Option<String>,
) -> SyncProfile {
    SyncProfile {
        external_identity_id: external_id,
        display_name,
        email,
        avatar_url,
    }
}
