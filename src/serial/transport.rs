use crate::baud::BaudRate;
use std::fmt;

/// Identifies one open/close cycle of a transport.
///
/// Every event a transport emits carries the id of the link it belongs to,
/// so events from a link the caller has already given up on can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LinkId(u64);

impl LinkId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Signals a transport delivers back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Opened,
    Closed,
    Data(String),
    Error(String),
}

/// Duplex byte stream the session drives.
///
/// All methods return immediately. Outcomes arrive as events:
/// - `open` yields exactly one of `Opened` / `Error` for the returned link,
///   then zero or more `Data`, then `Closed` or `Error`.
/// - `close` yields `Closed`, also when nothing is open.
/// - `write` is fire-and-forget; failures surface as a later `Error`.
pub trait Transport: Send {
    fn open(&mut self, baud_rate: BaudRate) -> LinkId;

    fn close(&mut self);

    fn write(&mut self, data: &str);

    /// Short label for the header, e.g. the device path.
    fn describe(&self) -> String;
}
