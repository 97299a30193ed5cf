use super::settings::{PartialHubSettings, PartialSettings, Settings};
use super::load_config;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.server.path, "/ws");
    assert_eq!(settings.hub.max_connections, 1000);
    assert_eq!(settings.hub.outbound_buffer, 64);
    assert_eq!(settings.hub.send_timeout_ms, 100);
    assert!(settings.hub.echo_to_sender);
    assert_eq!(settings.log.level, "info");
    assert_eq!(settings.bind_addr(), "127.0.0.1:8080");
}

#[test]
fn test_merge_keeps_defaults_for_missing_fields() {
    let partial = PartialSettings {
        hub: Some(PartialHubSettings {
            max_connections: None,
            outbound_buffer: Some(8),
            send_timeout_ms: None,
            echo_to_sender: Some(false),
        }),
        ..Default::default()
    };

    let settings = Settings::merge(partial);
    assert_eq!(settings.hub.outbound_buffer, 8);
    assert!(!settings.hub.echo_to_sender);
    assert_eq!(settings.hub.max_connections, 1000);
    assert_eq!(settings.server.port, 8080);
}

/// Runs `f` with the working directory switched to a fresh temp dir.
fn in_temp_dir<F: FnOnce(&TempDir)>(f: F) {
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");
    f(&tmp);
    env::set_current_dir(orig).expect("restore cwd");
}

#[test]
#[serial]
fn load_config_without_sources_uses_defaults() {
    in_temp_dir(|_| {
        let cfg = load_config().expect("load_config failed");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.path, "/ws");
    });
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    in_temp_dir(|_| {
        fs::create_dir_all("config").expect("create config dir");
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            path = "/chat"

            [hub]
            outbound_buffer = 16
            echo_to_sender = false

            [log]
            level = "debug"
        "#;
        fs::write("config/default.toml", toml).expect("write config file");

        let cfg = load_config().expect("load_config failed");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.path, "/chat");
        assert_eq!(cfg.hub.outbound_buffer, 16);
        assert!(!cfg.hub.echo_to_sender);
        assert_eq!(cfg.hub.send_timeout_ms, 100);
        assert_eq!(cfg.log.level, "debug");
    });
}

#[test]
#[serial]
fn environment_overrides_file() {
    in_temp_dir(|_| {
        fs::create_dir_all("config").expect("create config dir");
        fs::write("config/default.toml", "[server]\nport = 9000\n").expect("write config file");

        temp_env::with_vars(
            [
                ("CHATROOM_SERVER__PORT", Some("9100")),
                ("CHATROOM_HUB__SEND_TIMEOUT_MS", Some("5")),
            ],
            || {
                let cfg = load_config().expect("load_config failed");
                assert_eq!(cfg.server.port, 9100);
                assert_eq!(cfg.hub.send_timeout_ms, 5);
            },
        );
    });
}
