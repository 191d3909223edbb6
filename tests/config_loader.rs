use serialterm::config::{Config, ConfigError};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.serial.baud_rate.value(), 115200);
    assert_eq!(config.serial.port, None);
    assert_eq!(config.serial.read_timeout(), Duration::from_millis(50));
    assert_eq!(config.serial.connect_timeout(), None);
    assert_eq!(config.ui.tick_rate(), Duration::from_millis(250));
}

#[test]
fn full_file_is_applied() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[serial]
port = "/dev/ttyUSB0"
baud_rate = 9600
read_timeout_ms = 20
connect_timeout_seconds = 5
connect_on_start = true

[ui]
tick_rate_ms = 100
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.serial.port.as_deref(), Some("/dev/ttyUSB0"));
    assert_eq!(config.serial.baud_rate.value(), 9600);
    assert_eq!(config.serial.read_timeout(), Duration::from_millis(20));
    assert_eq!(config.serial.connect_timeout(), Some(Duration::from_secs(5)));
    assert!(config.serial.connect_on_start);
    assert_eq!(config.ui.tick_rate_ms, 100);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[serial]\nbaud_rate = 57600\n");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.serial.baud_rate.value(), 57600);
    assert_eq!(config.serial.read_timeout_ms, 50);
    assert_eq!(config.ui.tick_rate_ms, 250);
}

#[test]
fn unsupported_baud_rate_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[serial]\nbaud_rate = 250000\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }), "{err}");
    assert!(err.to_string().contains("250000"), "{err}");
}

#[test]
fn zero_read_timeout_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[serial]\nread_timeout_ms = 0\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}

#[test]
fn zero_tick_rate_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[ui]\ntick_rate_ms = 0\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn blank_port_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[serial]\nport = \"  \"\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[serial\nport = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse config file"));
}
