use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "dropzone")]
#[command(about = "Upload images and PDFs to a dropzone server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload files in a single request
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Server base URL
        #[arg(long, short = 's', env = "DROPZONE_SERVER", default_value = "http://127.0.0.1:8080")]
        server: String,

        /// Path of the upload endpoint
        #[arg(long, short = 'p', env = "DROPZONE_UPLOAD_PATH", default_value = "/upload")]
        path: String,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_upload_defaults() {
        let cli = Cli::try_parse_from(["dropzone", "upload", "a.png", "b.pdf"]).unwrap();

        let Commands::Upload {
            files,
            server,
            path,
        } = cli.command
        else {
            panic!("expected upload command");
        };
        assert_eq!(files, [PathBuf::from("a.png"), PathBuf::from("b.pdf")]);
        assert_eq!(server, "http://127.0.0.1:8080");
        assert_eq!(path, "/upload");
    }

    #[test]
    fn test_upload_requires_files() {
        assert!(Cli::try_parse_from(["dropzone", "upload"]).is_err());
    }
}
