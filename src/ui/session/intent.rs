//! Intents for the serial session.

use crate::baud::BaudRate;
use crate::ui::mvi::Intent;
use crossterm::event::KeyEvent;

/// Intents that can be dispatched to the session reducer.
#[derive(Debug)]
pub enum SessionIntent {
    /// User asked to open the port (connect or reconnect).
    UserConnect,

    /// User asked to close the port. Status changes once the transport confirms.
    UserDisconnect,

    /// Transport confirmed the port is open.
    TransportOpened,

    /// Transport confirmed the port is closed.
    TransportClosed,

    /// Transport failed; the message is shown verbatim.
    TransportError(String),

    /// Decoded text read from the port.
    DataReceived(String),

    /// A key the input layer did not consume as a hotkey.
    KeyPressed(KeyEvent),

    /// Baud rate picked in the UI, as text. Invalid text is ignored.
    BaudRateChanged(String),
}

impl Intent for SessionIntent {}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Open the transport at the given speed.
    Open { baud_rate: BaudRate },

    /// Close the transport.
    Close,

    /// Transmit text.
    Write { data: String },

    /// Return keyboard focus to the terminal view.
    FocusView,

    /// The log grew or the prompt changed; follow the bottom of the view.
    ScrollToBottom,
}
