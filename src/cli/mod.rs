//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use args::{CveListSort, ImageListSort, SortValueParser};
use completions::server_name_candidates;
use validate::ImageRef;

pub mod args;
pub mod completions;
pub mod context;
pub mod cve;
pub mod server;
pub mod validate;

pub use args::OutputFormat;
pub use context::SearchContext;

/// cvectl - query a container registry's CVE index
#[derive(Parser, Debug)]
#[command(name = "cvectl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Registry base URL (overrides configured servers)
    #[arg(long, global = true, env = "CVECTL_URL", hide_env = true)]
    pub url: Option<String>,

    /// Named server from the config file
    #[arg(
        long,
        global = true,
        env = "CVECTL_SERVER",
        hide_env = true,
        add = server_name_candidates()
    )]
    pub server: Option<String>,

    /// Basic-auth credentials as user:password
    #[arg(long, global = true, env = "CVECTL_USER", hide_env = true)]
    pub user: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(
        long,
        global = true,
        env = "CVECTL_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "CVECTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true, env = "CVECTL_INSECURE", hide_env = true)]
    pub insecure: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "CVECTL_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the registry's CVE index
    #[command(subcommand, visible_alias = "cves")]
    Cve(CveCommands),

    /// Manage configured registry servers
    #[command(subcommand)]
    Server(ServerCommands),

    /// Display version information
    Version,

    /// Generate shell completions (static)
    #[command(after_help = "\
Static completions (subcommands/flags only):
  bash:   cvectl completion bash > /etc/bash_completion.d/cvectl
  zsh:    cvectl completion zsh > \"${fpath[1]}/_cvectl\"
  fish:   cvectl completion fish > ~/.config/fish/completions/cvectl.fish

Dynamic completions (includes configured server names):
  bash:   echo 'source <(COMPLETE=bash cvectl)' >> ~/.bashrc
  zsh:    echo 'source <(COMPLETE=zsh cvectl)' >> ~/.zshrc
  fish:   echo 'COMPLETE=fish cvectl | source' >> ~/.config/fish/config.fish")]
    Completion {
        /// Shell to generate completions for (static only)
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// CVE search subcommands
#[derive(Subcommand, Debug)]
pub enum CveCommands {
    /// List CVEs affecting an image
    #[command(after_help = "EXAMPLES:\n  \
            cvectl cve list alpine:3.18\n  \
            cvectl cve list alpine@sha256:c5b1261d6d3e --cve-id CVE-2023-5363\n  \
            cvectl cve list app:1.0 --format json")]
    List {
        /// Image as repo:tag or repo@digest
        #[arg(value_parser = validate::image_ref)]
        image: ImageRef,

        /// Only report this CVE
        #[arg(long)]
        cve_id: Option<String>,

        /// Sort order
        #[arg(
            long,
            value_parser = SortValueParser::<CveListSort>::new(),
            default_value_t = CveListSort::Severity
        )]
        sort_by: CveListSort,
    },

    /// List images affected by a CVE
    #[command(after_help = "EXAMPLES:\n  \
            cvectl cve affected CVE-2021-44228\n  \
            cvectl cve affected CVE-2021-44228 --repo log4j-app --sort-by update-time")]
    Affected {
        /// CVE identifier (CVE-...)
        #[arg(value_parser = validate::cve_id)]
        cve_id: String,

        /// Only report images in this repository
        #[arg(long, default_value = "")]
        repo: String,

        /// Sort order
        #[arg(
            long,
            value_parser = SortValueParser::<ImageListSort>::new(),
            default_value_t = ImageListSort::AlphaAsc
        )]
        sort_by: ImageListSort,
    },

    /// List tags of a repository where a CVE is fixed
    #[command(after_help = "EXAMPLES:\n  \
            cvectl cve fixed alpine CVE-2023-5363\n  \
            cvectl cve fixed library/nginx CVE-2023-44487 --sort-by alpha-dsc")]
    Fixed {
        /// Repository name
        #[arg(value_parser = validate::repo_name)]
        repo: String,

        /// CVE identifier
        cve_id: String,

        /// Sort order
        #[arg(
            long,
            value_parser = SortValueParser::<ImageListSort>::new(),
            default_value_t = ImageListSort::AlphaAsc
        )]
        sort_by: ImageListSort,
    },
}

/// Server management subcommands
#[derive(Subcommand, Debug)]
pub enum ServerCommands {
    /// Add or replace a server
    ///
    /// The global --user and --insecure flags are stored with the server.
    #[command(after_help = "EXAMPLES:\n  \
            cvectl server add local http://localhost:5000\n  \
            cvectl server add prod https://registry.example.com --user admin:secret\n  \
            cvectl server add lab https://10.0.0.5:5000 --insecure")]
    Add {
        /// Server name
        name: String,

        /// Registry base URL
        url: String,
    },

    /// List configured servers
    List,

    /// Set the active server
    Use {
        /// Server name
        #[arg(add = server_name_candidates())]
        name: String,
    },

    /// Remove a server
    Remove {
        /// Server name
        #[arg(add = server_name_candidates())]
        name: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
