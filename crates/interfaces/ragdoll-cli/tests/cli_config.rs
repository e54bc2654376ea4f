use camino::{Utf8Path, Utf8PathBuf};
use ragdoll_cli::{commands, ConfigOverrides};
use ragdoll_core::SyncConfig;
use ragdoll_persistence::ConfigStore;
use tempfile::tempdir;

fn scratch_store() -> (tempfile::TempDir, ConfigStore) {
    let dir = tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    (dir, ConfigStore::new(root.join("configuration.ini")))
}

#[test]
fn overrides_replace_only_what_was_given() {
    let overrides = ConfigOverrides {
        branch: Some("main".into()),
        no_progress: true,
        display_width: Some(10_000),
        ..Default::default()
    };
    let mut config = SyncConfig::default();
    overrides.apply(&mut config);

    assert_eq!(config.branch, "main");
    assert!(!config.verbose);
    assert_eq!(config.display_width, ragdoll_config::MAX_DISPLAY_WIDTH);
    assert_eq!(config.source_url, ragdoll_config::DEFAULT_SOURCE_URL);
    assert_eq!(config.target_directory, Utf8Path::new("ml-agents"));
}

#[test]
fn init_then_show_round_trips_through_the_file() {
    let (_dir, store) = scratch_store();
    let overrides = ConfigOverrides {
        url: Some("https://example.com/r.git".into()),
        sleep_time: Some(0.0),
        ..Default::default()
    };

    let written = commands::cmd_config_init(&store, &overrides).unwrap();
    assert!(store.exists());

    let text = commands::cmd_config_show(&store, false).unwrap();
    assert!(text.starts_with("[Configuration]"));
    assert!(text.contains("url = https://example.com/r.git"));
    assert!(text.contains("num_dashes = 91"));

    let json = commands::cmd_config_show(&store, true).unwrap();
    let parsed: SyncConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, written);
}

#[test]
fn from_config_starts_from_the_persisted_file() {
    let (_dir, store) = scratch_store();
    let persisted = SyncConfig {
        branch: "release".into(),
        verbose: false,
        ..SyncConfig::default()
    };
    store.save(&persisted).unwrap();

    let overrides = ConfigOverrides {
        directory: Some("elsewhere".into()),
        ..Default::default()
    };
    let config = commands::resolve_config(&store, true, &overrides).unwrap();
    assert_eq!(config.branch, "release");
    assert!(!config.verbose);
    assert_eq!(config.target_directory, Utf8Path::new("elsewhere"));

    // Without --from-config the file is ignored.
    let config = commands::resolve_config(&store, false, &overrides).unwrap();
    assert_eq!(config.branch, ragdoll_config::DEFAULT_BRANCH);
}

#[test]
fn show_without_a_file_fails_with_context() {
    let (_dir, store) = scratch_store();
    let err = commands::cmd_config_show(&store, false).unwrap_err();
    assert!(err.to_string().contains("Failed to load configuration"));
}

#[tokio::test]
async fn install_into_missing_directory_is_an_error() {
    let (dir, _store) = scratch_store();
    let missing = Utf8PathBuf::from_path_buf(dir.path().join("nope")).unwrap();
    assert!(commands::cmd_install(&missing, None).await.is_err());
}
