//! Server command implementations
//!
//! Manages the named registry servers stored in the config file.

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::{Config, Credentials, ServerEntry, normalize_url};
use crate::error::{ConfigError, Result};
use crate::output::Formattable;

/// Display model for server list output. Never carries the password.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ServerListItem {
    #[tabled(rename = "")]
    #[serde(skip)]
    pub marker: String,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "URL")]
    pub url: String,
    #[tabled(rename = "USER")]
    pub user: String,
    #[tabled(rename = "VERIFY TLS")]
    pub verify_tls: bool,
    #[tabled(skip)]
    pub active: bool,
}

impl ServerListItem {
    fn new(name: &str, entry: &ServerEntry, active: bool) -> Self {
        // Stored as user:password; only the user half is shown
        let user = entry
            .user
            .as_deref()
            .map(|u| u.split_once(':').map_or(u, |(name, _)| name).to_string())
            .unwrap_or_else(|| "-".to_string());

        Self {
            marker: if active { "*".to_string() } else { String::new() },
            name: name.to_string(),
            url: entry.url.clone(),
            user,
            verify_tls: entry.verify_tls,
            active,
        }
    }
}

/// Rows for every configured server, in name order
pub fn server_items(config: &Config) -> Vec<ServerListItem> {
    config
        .servers
        .iter()
        .map(|(name, entry)| {
            let active = config.active_server.as_deref() == Some(name.as_str());
            ServerListItem::new(name, entry, active)
        })
        .collect()
}

/// Add or replace a server
pub fn add(name: &str, url: &str, opts: &GlobalOptions) -> Result<()> {
    let url = normalize_url(url)?;
    if let Some(ref user) = opts.user {
        Credentials::parse(user)?;
    }

    let mut config = Config::load_or_default(opts.config_ref())?;
    let replaced = config.servers.contains_key(name);

    config.add_server(
        name,
        ServerEntry {
            url: url.clone(),
            user: opts.user.clone(),
            verify_tls: !opts.insecure,
        },
    );
    config.save_at(opts.config_ref())?;

    let verb = if replaced { "Updated" } else { "Added" };
    println!("{} {} server: {} ({})", "✓".green(), verb, name.bold(), url);

    if config.active_server.as_deref() == Some(name) {
        println!("  Active server: {}", name.bold());
    } else {
        println!(
            "\n{} Activate with: {}",
            "→".cyan(),
            format!("cvectl server use {}", name).cyan()
        );
    }

    Ok(())
}

/// List configured servers
pub fn list(opts: &GlobalOptions) -> Result<()> {
    let config = Config::load_or_default(opts.config_ref())?;
    let items = server_items(&config);

    match opts.format {
        OutputFormat::Table if items.is_empty() => {
            println!(
                "No servers configured. Add one with {}",
                "cvectl server add <name> <url>".cyan()
            );
        }
        format => items.print(format)?,
    }

    Ok(())
}

/// Set the active server
pub fn use_server(name: &str, opts: &GlobalOptions) -> Result<()> {
    let mut config = Config::load_at(opts.config_ref())?;

    if config.active_server.as_deref() == Some(name) {
        println!("{} Server '{}' is already active.", "✓".green(), name.bold());
        return Ok(());
    }

    config.set_active_server(name)?;
    config.save_at(opts.config_ref())?;

    println!("{} Switched to server: {}", "✓".green(), name.bold());

    Ok(())
}

/// Remove a server
pub fn remove(name: &str, yes: bool, opts: &GlobalOptions) -> Result<()> {
    let mut config = Config::load_at(opts.config_ref())?;

    if !config.servers.contains_key(name) {
        return Err(ConfigError::ServerNotFound(name.to_string()).into());
    }

    // Confirm removal
    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Remove server '{}'?", name))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let was_active = config.active_server.as_deref() == Some(name);
    config.remove_server(name)?;
    config.save_at(opts.config_ref())?;

    println!("{} Removed server: {}", "✓".green(), name);
    if was_active {
        println!(
            "{} No active server. Select one with: {}",
            "→".cyan(),
            "cvectl server use <name>".cyan()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    fn opts_in(dir: &TempDir) -> GlobalOptions {
        GlobalOptions {
            config: Some(dir.path().join("config.yaml").to_string_lossy().into_owned()),
            ..Default::default()
        }
    }

    fn load(opts: &GlobalOptions) -> Config {
        Config::load_at(opts.config_ref()).unwrap()
    }

    #[test]
    fn test_add_creates_config_and_activates_first_server() {
        let dir = tempdir().unwrap();
        let opts = opts_in(&dir);

        add("local", "http://localhost:5000/", &opts).unwrap();

        let config = load(&opts);
        assert_eq!(config.active_server.as_deref(), Some("local"));
        assert_eq!(config.servers["local"].url, "http://localhost:5000");
        assert!(config.servers["local"].verify_tls);
    }

    #[test]
    fn test_add_stores_global_user_and_insecure() {
        let dir = tempdir().unwrap();
        let opts = GlobalOptions {
            user: Some("admin:secret".to_string()),
            insecure: true,
            ..opts_in(&dir)
        };

        add("lab", "https://10.0.0.5:5000", &opts).unwrap();

        let entry = load(&opts).servers["lab"].clone();
        assert_eq!(entry.user.as_deref(), Some("admin:secret"));
        assert!(!entry.verify_tls);
    }

    #[test]
    fn test_add_rejects_invalid_url_and_user() {
        let dir = tempdir().unwrap();
        let opts = opts_in(&dir);
        assert!(add("bad", "localhost:5000", &opts).is_err());

        let opts = GlobalOptions {
            user: Some("no-colon".to_string()),
            ..opts_in(&dir)
        };
        assert!(add("bad", "http://localhost:5000", &opts).is_err());
        assert!(!dir.path().join("config.yaml").exists());
    }

    #[test]
    fn test_use_and_remove() {
        let dir = tempdir().unwrap();
        let opts = opts_in(&dir);
        add("a", "http://a.example", &opts).unwrap();
        add("b", "http://b.example", &opts).unwrap();

        use_server("b", &opts).unwrap();
        assert_eq!(load(&opts).active_server.as_deref(), Some("b"));
        assert!(use_server("missing", &opts).is_err());

        remove("b", true, &opts).unwrap();
        let config = load(&opts);
        assert!(config.active_server.is_none());
        assert!(!config.servers.contains_key("b"));

        assert!(remove("b", true, &opts).is_err());
    }

    #[test]
    fn test_server_items_hide_password() {
        let mut config = Config::default();
        config.add_server(
            "prod",
            ServerEntry {
                url: "https://registry.example.com".to_string(),
                user: Some("admin:hunter2".to_string()),
                verify_tls: true,
            },
        );

        let items = server_items(&config);
        assert_eq!(items.len(), 1);
        assert!(items[0].active);
        assert_eq!(items[0].marker, "*");
        assert_eq!(items[0].user, "admin");

        let json = items.format(OutputFormat::Json).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("\"active\": true"));
    }
}
