//! Command line definitions for the `satchel` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use satchel_infrastructure::config::DEFAULT_API_URL;

/// Inspect, edit and sync Postman collections
#[derive(Parser, Debug)]
#[command(name = "satchel")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API key for the collection service
    #[arg(long, global = true, env = "POSTMAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the collection service
    #[arg(long, global = true, env = "SATCHEL_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "satchel=info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the folder and request tree of a collection
    Inspect(InspectArgs),
    /// Check that a file looks like a collection document
    Validate(FileArgs),
    /// Resolve {{variables}} in a text or in a request
    Resolve(ResolveArgs),
    /// Re-render a collection in canonical form
    Format(FormatArgs),
    /// Merge one collection into another as a folder
    Merge(MergeArgs),
    /// Download a collection by id
    Fetch(FetchArgs),
    /// Create or update a collection on the service
    Push(PushArgs),
}

/// A single collection file.
#[derive(clap::Args, Debug)]
pub struct FileArgs {
    /// Collection file
    pub file: PathBuf,
}

/// Arguments for `inspect`.
#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Collection file
    pub file: PathBuf,

    /// Also list the entries that could not be read
    #[arg(short, long)]
    pub warnings: bool,
}

/// Arguments for `resolve`.
#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Collection file
    pub file: PathBuf,

    /// Text containing {{name}} tokens
    #[arg(required_unless_present = "request")]
    pub text: Option<String>,

    /// Resolve the request with this name instead of a text
    #[arg(short, long, conflicts_with = "text")]
    pub request: Option<String>,

    /// Environment file; may be repeated to provide parents
    #[arg(short, long = "env")]
    pub envs: Vec<PathBuf>,

    /// Environment to apply; defaults to the last one given
    #[arg(long, requires = "envs")]
    pub env_name: Option<String>,
}

/// Arguments for `format`.
#[derive(clap::Args, Debug)]
pub struct FormatArgs {
    /// Collection file
    pub file: PathBuf,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `merge`.
#[derive(clap::Args, Debug)]
pub struct MergeArgs {
    /// Collection receiving the merge
    pub target: PathBuf,

    /// Collection to merge in
    pub other: PathBuf,

    /// Folder of the target to merge into; the root when omitted
    #[arg(long)]
    pub parent: Option<String>,

    /// Attach the merged collection's scripts to the new folder
    #[arg(long)]
    pub copy_scripts: bool,

    /// Copy the merged collection's variables into the target
    #[arg(long)]
    pub copy_variables: bool,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for `fetch`.
#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Remote collection id
    pub id: String,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `push`.
#[derive(clap::Args, Debug)]
pub struct PushArgs {
    /// Collection file; its id is updated after a create
    pub file: PathBuf,

    /// Workspace for newly created collections
    #[arg(long)]
    pub workspace: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_requires_text_or_request() {
        assert!(Cli::try_parse_from(["satchel", "resolve", "c.json"]).is_err());
        assert!(Cli::try_parse_from(["satchel", "resolve", "c.json", "{{host}}"]).is_ok());
        assert!(Cli::try_parse_from(["satchel", "resolve", "c.json", "-r", "Get pet"]).is_ok());
        assert!(
            Cli::try_parse_from(["satchel", "resolve", "c.json", "--env-name", "dev", "x"]).is_err()
        );
    }
}
