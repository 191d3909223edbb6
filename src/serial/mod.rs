//! Serial transport: the asynchronous, fallible I/O boundary of a session.
//!
//! The session never touches a port directly. It asks a [`Transport`] to
//! open, close or write, and the transport answers later with
//! [`TransportEvent`]s tagged by [`LinkId`].

mod decode;
mod error;
mod port;
mod transport;

pub use decode::Utf8Decoder;
pub use error::TransportError;
pub use port::{list_ports, SerialSettings, SerialTransport};
pub use transport::{LinkId, Transport, TransportEvent};
