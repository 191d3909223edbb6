use crossterm::event::{self, Event, KeyEvent};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::serial::{LinkId, TransportEvent};
use crate::shutdown::ShutdownHandle;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Everything the runtime loop reacts to, in delivery order.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
    /// Event from the serial link identified by `link`.
    Transport {
        link: LinkId,
        event: TransportEvent,
    },
    /// OS signal received (SIGTERM, SIGINT)
    Shutdown,
}

pub type EventSender = UnboundedSender<AppEvent>;

/// Funnels keyboard, timer, signal and transport events into one queue.
pub struct EventHandler {
    rx: UnboundedReceiver<AppEvent>,
    tx: EventSender,
}

impl EventHandler {
    /// Must be called from within a tokio runtime.
    pub fn new(tick_rate: Duration, shutdown: ShutdownHandle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        spawn_input_reader(tx.clone(), shutdown.clone());
        spawn_ticker(tx.clone(), tick_rate, shutdown.clone());
        spawn_signal_listener(tx.clone(), shutdown);

        Self { rx, tx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn sender(&self) -> EventSender {
        self.tx.clone()
    }
}

fn spawn_input_reader(tx: EventSender, shutdown: ShutdownHandle) {
    let spawned = thread::Builder::new()
        .name("tty-input".to_string())
        .spawn(move || loop {
            if shutdown.is_shutting_down() {
                break;
            }

            // Short poll timeout so the shutdown flag is checked frequently
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    warn!(error = %err, "terminal input poll failed");
                    break;
                }
            }

            let forwarded = match event::read() {
                Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                Ok(Event::Resize(cols, rows)) => tx.send(AppEvent::Resize(cols, rows)),
                Ok(_) => Ok(()),
                Err(err) => {
                    warn!(error = %err, "terminal input read failed");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

    if let Err(err) = spawned {
        warn!(error = %err, "failed to start input thread");
    }
}

fn spawn_ticker(tx: EventSender, tick_rate: Duration, shutdown: ShutdownHandle) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                }
                _ = shutdown.wait() => break,
            }
        }
    });
}

fn spawn_signal_listener(tx: EventSender, shutdown: ShutdownHandle) {
    tokio::spawn(async move {
        wait_for_signal().await;
        debug!("termination signal received");
        shutdown.signal();
        let _ = tx.send(AppEvent::Shutdown);
    });
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(err) => {
            warn!(error = %err, "cannot listen for SIGTERM");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = terminate.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
