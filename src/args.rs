//! Command-line interface.

use clap::Parser;
use std::path::PathBuf;

use crate::baud::BaudRate;
use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "serialterm", version, about = "Interactive terminal for serial devices")]
pub struct Cli {
    /// Serial device to open (e.g. /dev/ttyUSB0). Defaults to the first port found
    #[arg(short, long, value_name = "PATH")]
    pub port: Option<String>,

    /// Initial baud rate (1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200)
    #[arg(short, long, value_name = "RATE")]
    pub baud: Option<BaudRate>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// List available serial ports and exit
    #[arg(long)]
    pub list_ports: bool,

    /// Open the port immediately on startup
    #[arg(long)]
    pub connect: bool,
}

impl Cli {
    /// Overlay command-line flags on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = &self.port {
            config.serial.port = Some(port.clone());
        }
        if let Some(baud) = self.baud {
            config.serial.baud_rate = baud;
        }
        if self.connect {
            config.serial.connect_on_start = true;
        }
    }
}
