use crate::commands::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "ih")]
#[command(about = "Interview Hub user directory CLI")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Server URL (defaults to the configured bind address)
    #[arg(long, global = true, env = "IH_SERVER_URL")]
    pub(crate) server: Option<String>,

    /// Caller identity, for servers running without token verification
    #[arg(long, global = true)]
    pub(crate) user_id: Option<String>,

    /// Bearer token; takes precedence over --user-id
    #[arg(long, global = true, env = "IH_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub(crate) pretty: bool,
}
