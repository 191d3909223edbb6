//! Shared test utilities and a transport double.

#![allow(dead_code, unused_imports)]

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use parking_lot::Mutex;
use serialterm::baud::BaudRate;
use serialterm::config::Config;
use serialterm::serial::{LinkId, Transport, TransportEvent};
use serialterm::ui::app::App;
use std::sync::Arc;

/// A command the app issued to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(BaudRate),
    Close,
    Write(String),
}

/// Transport that records commands and never emits anything on its own.
/// Tests feed events back through `App::on_transport_event`.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<Call>>>,
    last_link: Arc<Mutex<LinkId>>,
}

impl RecordingTransport {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Write(data) => Some(data),
                _ => None,
            })
            .collect()
    }

    pub fn last_link(&self) -> LinkId {
        *self.last_link.lock()
    }
}

impl Transport for RecordingTransport {
    fn open(&mut self, baud_rate: BaudRate) -> LinkId {
        self.calls.lock().push(Call::Open(baud_rate));
        let mut link = self.last_link.lock();
        *link = link.next();
        *link
    }

    fn close(&mut self) {
        self.calls.lock().push(Call::Close);
    }

    fn write(&mut self, data: &str) {
        self.calls.lock().push(Call::Write(data.to_string()));
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

pub fn make_app_with(config: Config) -> (App, RecordingTransport) {
    let transport = RecordingTransport::default();
    let app = App::new(Box::new(transport.clone()), &config);
    (app, transport)
}

pub fn make_app() -> (App, RecordingTransport) {
    make_app_with(Config::default())
}

/// App in `Connected` state on link returned by the transport.
pub fn connected_app() -> (App, RecordingTransport) {
    let (mut app, transport) = make_app();
    app.connect();
    app.on_transport_event(transport.last_link(), TransportEvent::Opened);
    (app, transport)
}

pub fn press_key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

pub fn ctrl_key(ch: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(ch),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

pub fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.on_key(press_key(KeyCode::Char(ch)));
    }
}

pub fn log_lines(app: &App) -> Vec<String> {
    app.session().lines.lines().iter().cloned().collect()
}
