use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use ragdoll_cli::{commands, ConfigOverrides};
use ragdoll_persistence::ConfigStore;
use std::process::ExitCode;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

/// Exit status when the packages could not be installed.
const EXIT_INSTALL_FAILED: u8 = 2;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// INI file the run configuration is persisted to
    #[arg(long, global = true, default_value = ragdoll_config::CONFIG_FILE_NAME)]
    config: Utf8PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Persist the configuration, sync the repository and install its packages
    Run {
        #[command(flatten)]
        overrides: ConfigOverrides,
        #[arg(long, help = "Start from the persisted configuration instead of defaults")]
        from_config: bool,
        #[arg(long, help = "Render progress while fetching into an existing checkout")]
        fetch_progress: bool,
        #[arg(long, help = "Exit successfully even if package installation fails")]
        allow_install_failure: bool,
    },
    /// Clone or update the repository only
    Sync {
        #[command(flatten)]
        overrides: ConfigOverrides,
        #[arg(long, help = "Start from the persisted configuration instead of defaults")]
        from_config: bool,
        #[arg(long, help = "Render progress while fetching into an existing checkout")]
        fetch_progress: bool,
    },
    /// Install the packages of an existing checkout
    Install {
        #[arg(long, default_value = ragdoll_config::DEFAULT_TARGET_DIRECTORY)]
        directory: Utf8PathBuf,
        #[arg(long, help = "Installer command; the package path is appended")]
        installer: Option<String>,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write defaults (plus overrides) to the configuration file
    Init {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },
    Show {
        #[arg(long)]
        json: bool,
    },
}

fn install_exit(installed: bool) -> ExitCode {
    if installed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INSTALL_FAILED)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = ConfigStore::new(cli.config);

    let code = match cli.command {
        Commands::Run {
            overrides,
            from_config,
            fetch_progress,
            allow_install_failure,
        } => {
            let config = commands::resolve_config(&store, from_config, &overrides)?;
            let report = commands::cmd_run(store, config, fetch_progress).await?;
            if !report.installed && !allow_install_failure {
                error!("Package installation failed");
                install_exit(false)
            } else {
                ExitCode::SUCCESS
            }
        }
        Commands::Sync {
            overrides,
            from_config,
            fetch_progress,
        } => {
            let config = commands::resolve_config(&store, from_config, &overrides)?;
            commands::cmd_sync(config, fetch_progress).await?;
            ExitCode::SUCCESS
        }
        Commands::Install {
            directory,
            installer,
        } => install_exit(commands::cmd_install(&directory, installer).await?),
        Commands::Config { command } => match command {
            ConfigCommands::Init { overrides } => {
                commands::cmd_config_init(&store, &overrides)?;
                println!(":: Wrote {}", store.path());
                ExitCode::SUCCESS
            }
            ConfigCommands::Show { json } => {
                println!("{}", commands::cmd_config_show(&store, json)?);
                ExitCode::SUCCESS
            }
        },
    };

    Ok(code)
}
