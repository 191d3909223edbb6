use crate::baud::BaudRate;
use crate::serial::decode::Utf8Decoder;
use crate::serial::error::TransportError;
use crate::serial::transport::{LinkId, Transport, TransportEvent};
use crate::ui::events::{AppEvent, EventSender};
use serialport::{DataBits, FlowControl, Parity, SerialPort, SerialPortInfo, StopBits};
use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

const READ_BUFFER_SIZE: usize = 4096;

/// Where and how to open the device.
#[derive(Debug, Clone)]
pub struct SerialSettings {
    /// Device path. `None` picks the first enumerated port at open time.
    pub port: Option<String>,
    /// Upper bound on how long a close request waits for a blocked read.
    pub read_timeout: Duration,
}

/// Enumerate the serial ports visible to this process.
pub fn list_ports() -> Result<Vec<SerialPortInfo>, TransportError> {
    serialport::available_ports().map_err(TransportError::Enumerate)
}

/// [`Transport`] backed by a real serial device.
///
/// Each link runs on its own thread that owns the port: it opens the
/// device, then alternates between draining queued writes and a read
/// bounded by `read_timeout`, checking a cancel flag in between. Every link
/// ends with exactly one `Closed` or `Error` event.
pub struct SerialTransport {
    settings: SerialSettings,
    events: EventSender,
    current: LinkId,
    link: Option<Link>,
    /// Worker of a cancelled link; joined before the next open so the
    /// device is released first.
    retiring: Option<JoinHandle<()>>,
}

struct Link {
    cancel: Arc<AtomicBool>,
    outbound: Sender<Vec<u8>>,
    worker: JoinHandle<()>,
}

impl SerialTransport {
    pub fn new(settings: SerialSettings, events: EventSender) -> Self {
        Self {
            settings,
            events,
            current: LinkId::default(),
            link: None,
            retiring: None,
        }
    }

    /// Cancel the active link, if any. Returns false when there was no
    /// live worker left to report `Closed`.
    fn cancel_link(&mut self) -> bool {
        let Some(link) = self.link.take() else {
            return false;
        };
        let live = !link.worker.is_finished();
        link.cancel.store(true, Ordering::SeqCst);
        drop(link.outbound);
        if let Some(stale) = self.retiring.replace(link.worker) {
            let _ = stale.join();
        }
        live
    }

    fn emit(&self, event: TransportEvent) {
        let link = self.current;
        if self.events.send(AppEvent::Transport { link, event }).is_err() {
            trace!(%link, "transport event dropped (receiver gone)");
        }
    }
}

impl Transport for SerialTransport {
    fn open(&mut self, baud_rate: BaudRate) -> LinkId {
        self.cancel_link();
        let previous = self.retiring.take();

        self.current = self.current.next();
        let ctx = LinkContext {
            id: self.current,
            events: self.events.clone(),
            cancel: Arc::new(AtomicBool::new(false)),
        };
        let cancel = Arc::clone(&ctx.cancel);
        let (outbound, queue) = mpsc::channel();
        let settings = self.settings.clone();

        info!(link = %self.current, port = %self.describe(), %baud_rate, "opening serial link");
        let spawned = thread::Builder::new()
            .name(format!("serial-link-{}", self.current))
            .spawn(move || {
                if let Some(previous) = previous {
                    let _ = previous.join();
                }
                run_link(ctx, settings, baud_rate, queue);
            });

        match spawned {
            Ok(worker) => {
                self.link = Some(Link {
                    cancel,
                    outbound,
                    worker,
                });
            }
            Err(err) => self.emit(TransportEvent::Error(TransportError::Spawn(err).to_string())),
        }
        self.current
    }

    fn close(&mut self) {
        debug!(link = %self.current, "closing serial link");
        if !self.cancel_link() {
            self.emit(TransportEvent::Closed);
        }
    }

    fn write(&mut self, data: &str) {
        let Some(link) = &self.link else {
            debug!("write dropped: no serial link");
            return;
        };
        if link.outbound.send(data.as_bytes().to_vec()).is_err() {
            debug!(link = %self.current, "write dropped: serial link finished");
        }
    }

    fn describe(&self) -> String {
        self.settings
            .port
            .clone()
            .unwrap_or_else(|| "auto".to_string())
    }
}

impl Drop for SerialTransport {
    /// Cancels the link but never joins a worker that is still running: one
    /// blocked in the platform open call does not see the cancel flag.
    fn drop(&mut self) {
        self.cancel_link();
        match self.retiring.take() {
            Some(worker) if worker.is_finished() => {
                let _ = worker.join();
            }
            Some(_) => debug!(link = %self.current, "leaving serial worker to wind down"),
            None => {}
        }
    }
}

/// What a link worker needs to report back.
struct LinkContext {
    id: LinkId,
    events: EventSender,
    cancel: Arc<AtomicBool>,
}

impl LinkContext {
    fn emit(&self, event: TransportEvent) {
        if self
            .events
            .send(AppEvent::Transport {
                link: self.id,
                event,
            })
            .is_err()
        {
            trace!(link = %self.id, "transport event dropped (receiver gone)");
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

fn run_link(
    ctx: LinkContext,
    settings: SerialSettings,
    baud_rate: BaudRate,
    queue: Receiver<Vec<u8>>,
) {
    let outcome = open_port(&settings, baud_rate).and_then(|(name, port)| {
        if ctx.cancelled() {
            return Ok(());
        }
        info!(link = %ctx.id, port = %name, %baud_rate, "serial link open");
        ctx.emit(TransportEvent::Opened);
        pump(&ctx, port, &queue)
    });

    match outcome {
        Ok(()) => {
            info!(link = %ctx.id, "serial link closed");
            ctx.emit(TransportEvent::Closed);
        }
        Err(err) => {
            warn!(link = %ctx.id, error = %err, "serial link failed");
            ctx.emit(TransportEvent::Error(err.to_string()));
        }
    }
}

fn open_port(
    settings: &SerialSettings,
    baud_rate: BaudRate,
) -> Result<(String, Box<dyn SerialPort>), TransportError> {
    let name = match &settings.port {
        Some(path) => path.clone(),
        None => list_ports()?
            .into_iter()
            .next()
            .map(|info| info.port_name)
            .ok_or(TransportError::NoPort)?,
    };

    let port = serialport::new(name.clone(), baud_rate.value())
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(settings.read_timeout)
        .open()
        .map_err(|source| TransportError::Open {
            port: name.clone(),
            source,
        })?;

    Ok((name, port))
}

/// Move bytes until the link is cancelled or the port fails.
fn pump(
    ctx: &LinkContext,
    mut port: Box<dyn SerialPort>,
    queue: &Receiver<Vec<u8>>,
) -> Result<(), TransportError> {
    let mut decoder = Utf8Decoder::new();
    let mut buffer = [0u8; READ_BUFFER_SIZE];

    loop {
        if ctx.cancelled() {
            return port.flush().map_err(TransportError::Close);
        }

        loop {
            match queue.try_recv() {
                Ok(bytes) => {
                    port.write_all(&bytes)
                        .and_then(|()| port.flush())
                        .map_err(TransportError::Write)?;
                    trace!(link = %ctx.id, bytes = bytes.len(), "wrote to serial port");
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return port.flush().map_err(TransportError::Close);
                }
            }
        }

        match port.read(&mut buffer) {
            Ok(0) => {}
            Ok(count) => {
                let text = decoder.decode(&buffer[..count]);
                if !text.is_empty() {
                    ctx.emit(TransportEvent::Data(text));
                }
            }
            Err(err) if is_idle(&err) => {}
            Err(err) => return Err(TransportError::Read(err)),
        }
    }
}

fn is_idle(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::sync::mpsc::unbounded_channel;

    fn missing_device() -> SerialSettings {
        SerialSettings {
            port: Some("/dev/serialterm-test-missing".to_string()),
            read_timeout: Duration::from_millis(10),
        }
    }

    #[test]
    fn close_without_link_still_reports_closed() {
        let (tx, mut rx) = unbounded_channel();
        let mut transport = SerialTransport::new(missing_device(), tx);
        transport.close();
        match rx.try_recv() {
            Ok(AppEvent::Transport { event, .. }) => assert_eq!(event, TransportEvent::Closed),
            _ => panic!("expected Closed"),
        }
    }

    #[test]
    fn open_missing_device_reports_error_for_that_link() {
        let (tx, mut rx) = unbounded_channel();
        let mut transport = SerialTransport::new(missing_device(), tx);
        let link = transport.open(BaudRate::default());
        match rx.blocking_recv() {
            Some(AppEvent::Transport {
                link: got,
                event: TransportEvent::Error(message),
            }) => {
                assert_eq!(got, link);
                assert!(message.contains("/dev/serialterm-test-missing"));
            }
            _ => panic!("expected open error"),
        }
    }

    #[test]
    fn drop_does_not_wait_for_a_blocked_worker() {
        let (tx, _rx) = unbounded_channel();
        let mut transport = SerialTransport::new(missing_device(), tx);
        let (release, blocked) = mpsc::channel::<()>();
        transport.retiring = Some(thread::spawn(move || {
            let _ = blocked.recv();
        }));

        let started = Instant::now();
        drop(transport);
        assert!(started.elapsed() < Duration::from_secs(1));
        drop(release);
    }

    #[test]
    fn describe_reports_configured_port_or_auto() {
        let (tx, _rx) = unbounded_channel();
        let transport = SerialTransport::new(missing_device(), tx.clone());
        assert_eq!(transport.describe(), "/dev/serialterm-test-missing");
        let auto = SerialTransport::new(
            SerialSettings {
                port: None,
                read_timeout: Duration::from_millis(10),
            },
            tx,
        );
        assert_eq!(auto.describe(), "auto");
    }
}
