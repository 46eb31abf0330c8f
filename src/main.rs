use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use mirror_version::config::{AppConfig, config_path};
use mirror_version::logging::init_logging;
use mirror_version::show::VersionSwitcher;
use mirror_version::version::constraint::SemverConstraintResolver;
use mirror_version::version::fetcher::HttpPageFetcher;
use mirror_version::version::latest::LatestStrategy;

#[derive(Parser)]
#[command(name = "mirror-version")]
#[command(version, about = "Resolve release versions from a mirror's directory listing")]
struct Cli {
    /// Mirror URL serving the directory listing of releases
    #[arg(long, global = true)]
    mirror: Option<String>,

    /// Path to the config file (defaults to $XDG_CONFIG_HOME/mirror-version/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directives, e.g. "debug" (defaults to RUST_LOG, then "warn")
    #[arg(long, global = true)]
    log: Option<String>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the latest version
    Latest {
        /// Count pre-releases as well
        #[arg(short, long)]
        pre_release: bool,
        /// Pick the numerically highest version instead of the topmost one
        #[arg(long)]
        semantic: bool,
    },
    /// Print the latest patch of a minor version, e.g. 0.13
    LatestImplicit {
        minor: String,
        /// Pick the latest pre-release of the minor version
        #[arg(short, long)]
        pre_release: bool,
    },
    /// Print the version if the mirror publishes it, e.g. 1.5.7
    Exact { version: String },
    /// Print the highest version matching a constraint, e.g. "~> 1.5.0"
    Constraint {
        expression: String,
        #[arg(short, long)]
        pre_release: bool,
    },
    /// List all versions on the mirror
    List {
        /// Include pre-releases
        #[arg(short, long)]
        all: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_file = cli.config.clone().unwrap_or_else(config_path);
    let config = AppConfig::load(&config_file)?;

    let log_file = cli.log_file.clone().or_else(|| config.log_file.clone());
    let _guard = init_logging(cli.log.as_deref(), log_file.as_deref())?;

    let mirror_url = cli.mirror.clone().unwrap_or_else(|| config.mirror_url.clone());
    let fetcher = HttpPageFetcher::new(
        Duration::from_millis(config.timeout_ms),
        &config.user_agent,
    )
    .context("Failed to create HTTP client")?;

    let strategy = match cli.command {
        Command::Latest { semantic: true, .. } => LatestStrategy::Semantic,
        _ => LatestStrategy::DocumentOrder,
    };
    let switcher = VersionSwitcher::new(
        Arc::new(fetcher),
        Arc::new(SemverConstraintResolver),
        strategy,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut out = std::io::stdout().lock();

    runtime.block_on(async {
        match &cli.command {
            Command::Latest { pre_release, .. } => {
                switcher
                    .show_latest_version(&mut out, &mirror_url, *pre_release)
                    .await
            }
            Command::LatestImplicit { minor, pre_release } => {
                switcher
                    .show_latest_implicit_version(&mut out, minor, &mirror_url, *pre_release)
                    .await
            }
            Command::Exact { version } => {
                switcher
                    .show_exact_version(&mut out, version, &mirror_url)
                    .await
            }
            Command::Constraint {
                expression,
                pre_release,
            } => {
                switcher
                    .show_constraint_version(&mut out, expression, &mirror_url, *pre_release)
                    .await
            }
            Command::List { all } => {
                switcher
                    .show_version_list(&mut out, &mirror_url, *all)
                    .await
            }
        }
    })?;

    Ok(())
}
