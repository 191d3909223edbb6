use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::baud::BaudRate;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Serial link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Device path (e.g. "/dev/ttyUSB0", "COM3"). First enumerated port if unset.
    #[serde(default)]
    pub port: Option<String>,
    /// Initial baud rate; must be one of the supported rates.
    #[serde(default)]
    pub baud_rate: BaudRate,
    /// Read timeout in milliseconds (default: 50). Bounds how long a
    /// disconnect waits for an in-flight read.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// Give up on a pending connect after this many seconds. 0 disables.
    #[serde(default)]
    pub connect_timeout_seconds: u64,
    /// Open the port as soon as the UI starts.
    #[serde(default)]
    pub connect_on_start: bool,
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick interval in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_read_timeout_ms() -> u64 {
    50
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: BaudRate::default(),
            read_timeout_ms: default_read_timeout_ms(),
            connect_timeout_seconds: 0,
            connect_on_start: false,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl SerialConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        (self.connect_timeout_seconds > 0).then(|| Duration::from_secs(self.connect_timeout_seconds))
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}
