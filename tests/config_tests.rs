//! Integration tests for configuration loading

use parley::config::Config;
use std::net::SocketAddr;
use tempfile::tempdir;

#[test]
fn test_partial_file_keeps_defaults() -> anyhow::Result<()> {
    let config: Config = r#"
        [server]
        listen = "0.0.0.0:7000"
    "#
    .parse()?;

    assert_eq!(config.server.listen, "0.0.0.0:7000".parse::<SocketAddr>()?);
    assert!(config.server.http_enabled);
    assert_eq!(config.limits.outbound_queue_capacity, 256);
    assert_eq!(config.limits.max_frame_size, 64 * 1024);
    assert!(config.limits.client_max_frame_size > config.limits.max_frame_size);

    Ok(())
}

#[test]
fn test_load_from_file() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        [server]
        http_listen = "127.0.0.1:9090"
        http_enabled = false

        [limits]
        outbound_queue_capacity = 8
        "#,
    )?;

    let config = Config::load_from(&path)?;
    assert_eq!(config.server.http_listen, "127.0.0.1:9090".parse::<SocketAddr>()?);
    assert!(!config.server.http_enabled);
    assert_eq!(config.limits.outbound_queue_capacity, 8);
    assert_eq!(config.limits.inbound_queue_capacity, 1024);

    Ok(())
}

#[test]
fn test_missing_file_falls_back_to_defaults() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let config = Config::load_from(&dir.path().join("absent.toml"))?;
    assert!(config.server.http_enabled);
    Ok(())
}

#[test]
fn test_invalid_file_is_an_error() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[server]\nlisten = 12")?;

    assert!(Config::load_from(&path).is_err());
    Ok(())
}
