use engagement_calc::config::{EngagementConfig, ServerConfig};
use engagement_calc::engagement::Benchmark;
use engagement_calc::{AppError, QualityBand};
use serial_test::serial;
use std::env;
use tempfile::TempDir;

fn clear_env() {
    env::remove_var("ENGAGEMENT_CONFIG_PATH");
    env::remove_var("ENGAGEMENT_HOST");
    env::remove_var("ENGAGEMENT_PORT");
}

#[test]
#[serial]
fn missing_file_yields_defaults() {
    clear_env();
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("absent.toml");

    let (config, resolved) = EngagementConfig::load(Some(path.clone())).expect("load");
    assert_eq!(resolved, Some(path));
    assert_eq!(config.server, ServerConfig::default());
    assert_eq!(config.benchmarks.instagram, Benchmark::new(6.0, 3.0, 1.0));
    assert_eq!(config.benchmarks.twitter, Benchmark::new(3.0, 1.5, 0.5));
}

#[test]
#[serial]
fn written_config_loads_back() {
    clear_env();
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nested").join("engagement.toml");

    let mut config = EngagementConfig::default();
    config.server.port = 9191;
    config.benchmarks.tiktok = Benchmark::new(12.0, 6.0, 3.0);
    config.write(&path).expect("write");

    let (loaded, _) = EngagementConfig::load(Some(path)).expect("load");
    assert_eq!(loaded.server.port, 9191);
    assert_eq!(loaded.benchmarks.tiktok, Benchmark::new(12.0, 6.0, 3.0));
    assert_eq!(
        loaded.classifier().classify(11.0, "tiktok").quality,
        QualityBand::Good
    );
}

#[test]
#[serial]
fn partial_file_keeps_remaining_defaults() {
    clear_env();
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("engagement.toml");
    std::fs::write(
        &path,
        "[benchmarks.youtube]\nexcellent = 8.0\ngood = 4.0\naverage = 1.0\n",
    )
    .expect("write toml");

    let (config, _) = EngagementConfig::load(Some(path)).expect("load");
    assert_eq!(config.benchmarks.youtube, Benchmark::new(8.0, 4.0, 1.0));
    assert_eq!(config.benchmarks.instagram, Benchmark::new(6.0, 3.0, 1.0));
    assert_eq!(config.server.port, 8787);
}

#[test]
#[serial]
fn env_overrides_server_settings() {
    clear_env();
    let dir = TempDir::new().expect("tempdir");
    env::set_var("ENGAGEMENT_CONFIG_PATH", dir.path().join("engagement.toml"));
    env::set_var("ENGAGEMENT_HOST", "0.0.0.0");
    env::set_var("ENGAGEMENT_PORT", "9000");

    let (config, resolved) = EngagementConfig::load(None).expect("load");
    assert_eq!(resolved, Some(dir.path().join("engagement.toml")));
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);

    env::set_var("ENGAGEMENT_PORT", "not-a-port");
    let (config, _) = EngagementConfig::load(None).expect("load");
    assert_eq!(config.server.port, 8787);

    clear_env();
}

#[test]
#[serial]
fn malformed_file_is_a_parse_error() {
    clear_env();
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("engagement.toml");
    std::fs::write(&path, "[server\nport = ").expect("write toml");

    let err = EngagementConfig::load(Some(path)).expect_err("malformed config");
    assert!(matches!(err, AppError::ConfigParse(_)));
}
