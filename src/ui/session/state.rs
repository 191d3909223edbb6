//! State for the serial session.

use crate::baud::BaudRate;
use crate::ui::mvi::UiState;

use super::lines::LineBuffer;

/// Connection lifecycle of the single serial session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No transport open.
    #[default]
    Disconnected,

    /// Open requested, waiting for the transport to confirm.
    Connecting,

    /// Transport confirmed open; keystrokes are accepted.
    Connected,

    /// Last operation failed. The message is shown to the user as-is.
    Errored(String),
}

impl ConnectionStatus {
    /// Baud rate may only change while no connection is pending or active.
    pub fn is_baud_editable(&self) -> bool {
        matches!(self, Self::Disconnected | Self::Errored(_))
    }

    pub fn can_connect(&self) -> bool {
        self.is_baud_editable()
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
            Self::Errored(_) => "Error",
        }
    }
}

/// Everything the view needs to render the session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub status: ConnectionStatus,
    /// Characters typed since the last transmit.
    pub pending_input: String,
    pub baud_rate: BaudRate,
    /// Scrollback log plus the unterminated tail of the inbound stream.
    pub lines: LineBuffer,
}

impl UiState for SessionState {}

impl SessionState {
    pub fn new(baud_rate: BaudRate) -> Self {
        Self {
            baud_rate,
            ..Self::default()
        }
    }
}
