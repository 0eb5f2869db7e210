//! cvectl - query a container registry's CVE index

use clap::{CommandFactory, Parser};
use clap_complete::CompleteEnv;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, CveCommands, ServerCommands};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Answers `COMPLETE=<shell> cvectl ...` requests and exits
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` forces debug level, otherwise `RUST_LOG` or warn
fn init_logging(debug: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Version => {
            println!("cvectl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            cli::completions::generate(shell);
            Ok(())
        }
        Commands::Cve(cve_cmd) => match cve_cmd {
            CveCommands::List {
                image,
                cve_id,
                sort_by,
            } => cli::cve::list(&image, cve_id.as_deref(), sort_by, &opts).await,
            CveCommands::Affected {
                cve_id,
                repo,
                sort_by,
            } => cli::cve::affected(&cve_id, &repo, sort_by, &opts).await,
            CveCommands::Fixed {
                repo,
                cve_id,
                sort_by,
            } => cli::cve::fixed(&repo, &cve_id, sort_by, &opts).await,
        },
        Commands::Server(server_cmd) => match server_cmd {
            ServerCommands::Add { name, url } => cli::server::add(&name, &url, &opts),
            ServerCommands::List => cli::server::list(&opts),
            ServerCommands::Use { name } => cli::server::use_server(&name, &opts),
            ServerCommands::Remove { name, yes } => cli::server::remove(&name, yes, &opts),
        },
    }
}
