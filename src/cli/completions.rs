//! Shell completions for cvectl
//!
//! Static scripts come from `cvectl completion <shell>`. Dynamic completion
//! (`COMPLETE=<shell> cvectl`) additionally offers configured server names,
//! read from the local config file without touching the network.

use clap::CommandFactory;
use clap_complete::Shell;
use clap_complete::engine::{ArgValueCandidates, CompletionCandidate};

use crate::cli::Cli;
use crate::config::Config;

/// Environment variable that overrides the config path, as for `--config`
const CONFIG_ENV: &str = "CVECTL_CONFIG";

/// Write the static completion script for `shell` to stdout
pub fn generate(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

/// Complete server names from the config file.
///
/// Completions must never break the shell, so a missing or unreadable
/// config yields no candidates.
pub fn complete_server_names() -> Vec<CompletionCandidate> {
    let path = std::env::var(CONFIG_ENV).ok();
    let Ok(config) = Config::load_at(path.as_deref()) else {
        return vec![];
    };

    server_candidates(&config)
}

fn server_candidates(config: &Config) -> Vec<CompletionCandidate> {
    config
        .servers
        .iter()
        .map(|(name, entry)| {
            let help = if config.active_server.as_deref() == Some(name.as_str()) {
                format!("{} (active)", entry.url)
            } else {
                entry.url.clone()
            };
            CompletionCandidate::new(name.clone()).help(Some(help.into()))
        })
        .collect()
}

/// Create completion candidates for server names.
pub fn server_name_candidates() -> ArgValueCandidates {
    ArgValueCandidates::new(complete_server_names)
}
