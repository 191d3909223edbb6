use std::io;
use thiserror::Error;

/// Failures of the serial link. The `Display` text is what the user sees.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no serial port found")]
    NoPort,

    #[error("failed to list serial ports: {0}")]
    Enumerate(#[source] serialport::Error),

    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    #[error("close failed: {0}")]
    Close(#[source] io::Error),

    #[error("failed to start serial thread: {0}")]
    Spawn(#[source] io::Error),
}
