use crate::banner::ConsoleObserver;
use crate::progress::IndicatifDisplay;
use crate::ConfigOverrides;
use anyhow::{Context, Result};
use camino::Utf8Path;
use ragdoll_core::{SyncConfig, SyncOutcome};
use ragdoll_infra::installer::InstallerCommand;
use ragdoll_persistence::ConfigStore;
use ragdoll_pipeline::{
    Bootstrap, BootstrapReport, GitVcsEngine, InstallStep, PipPackageInstaller, ProgressReporter,
    SyncEngine, SyncOptions,
};

/// Defaults (or the persisted file when `from_config`), then CLI overrides.
pub fn resolve_config(
    store: &ConfigStore,
    from_config: bool,
    overrides: &ConfigOverrides,
) -> Result<SyncConfig> {
    let mut config = if from_config {
        store
            .load()
            .with_context(|| format!("Failed to load configuration from {}", store.path()))?
    } else {
        SyncConfig::default()
    };
    overrides.apply(&mut config);
    Ok(config)
}

fn sync_engine(fetch_progress: bool) -> SyncEngine {
    SyncEngine::with_components(
        Box::new(GitVcsEngine::default()),
        ProgressReporter::new(Box::new(IndicatifDisplay::new())),
        SyncOptions {
            report_fetch_progress: fetch_progress,
        },
    )
}

pub async fn cmd_run(
    store: ConfigStore,
    config: SyncConfig,
    fetch_progress: bool,
) -> Result<BootstrapReport> {
    let mut bootstrap = Bootstrap::new(store, sync_engine(fetch_progress), InstallStep::new());
    let report = bootstrap
        .run(&config, &mut ConsoleObserver)
        .await
        .context("Bootstrap failed")?;
    Ok(report)
}

pub async fn cmd_sync(config: SyncConfig, fetch_progress: bool) -> Result<SyncOutcome> {
    println!(":: Synchronizing {}", config.source_url);
    println!("   Branch: {}", config.branch);
    println!("   Target: {}", config.target_directory);

    let outcome = sync_engine(fetch_progress)
        .synchronize(&config)
        .await
        .context("Synchronization failed")?;

    println!(":: {}", outcome);
    Ok(outcome)
}

pub async fn cmd_install(directory: &Utf8Path, installer: Option<String>) -> Result<bool> {
    println!(":: Installing packages from {}", directory);

    if !directory.is_dir() {
        anyhow::bail!("{} is not a directory (run `sync` first)", directory);
    }

    let command = installer
        .map(InstallerCommand::new)
        .unwrap_or_default();
    let step = InstallStep::with_installer(Box::new(PipPackageInstaller::new(command)));
    Ok(step.install(directory).await)
}

pub fn cmd_config_init(store: &ConfigStore, overrides: &ConfigOverrides) -> Result<SyncConfig> {
    let config = resolve_config(store, false, overrides)?;
    store
        .save(&config)
        .with_context(|| format!("Failed to write {}", store.path()))?;
    Ok(config)
}

/// Render the persisted configuration as INI-style lines or pretty JSON.
pub fn cmd_config_show(store: &ConfigStore, json: bool) -> Result<String> {
    let config = store
        .load()
        .with_context(|| format!("Failed to load configuration from {}", store.path()))?;

    if json {
        return Ok(serde_json::to_string_pretty(&config)?);
    }

    Ok(format!(
        "[{}]\n{} = {}\n{} = {}\n{} = {}\n{} = {}\n{} = {}\n{} = {}",
        ragdoll_config::CONFIG_SECTION,
        ragdoll_config::KEY_URL,
        config.source_url,
        ragdoll_config::KEY_BRANCH,
        config.branch,
        ragdoll_config::KEY_DIRECTORY,
        config.target_directory,
        ragdoll_config::KEY_VERBOSE,
        config.verbose,
        ragdoll_config::KEY_DISPLAY_WIDTH,
        config.display_width,
        ragdoll_config::KEY_PACE_DELAY,
        config.pace_delay_seconds,
    ))
}
