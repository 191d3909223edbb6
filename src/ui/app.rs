use crate::baud::BaudRate;
use crate::config::Config;
use crate::serial::{LinkId, Transport, TransportEvent};
use crate::ui::mvi::Reducer;
use crate::ui::session::{
    ConnectionStatus, SessionEffect, SessionIntent, SessionReducer, SessionState,
};
use crossterm::event::KeyEvent;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PopupKind {
    BaudPicker,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Terminal,
    Popup(PopupKind),
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result
/// and hands back the requested effects.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {{
        let (state, effects) = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
        $self.$field = state;
        effects
    }};
}

/// Owner of the session and the single point where it changes.
///
/// Every user action and transport event goes through [`App::dispatch`];
/// the effects the reducer returns are applied to the transport here.
pub struct App {
    should_quit: bool,
    focus: Focus,
    /// Session state (MVI pattern).
    session: SessionState,
    /// Transport (resource, managed outside MVI).
    transport: Box<dyn Transport>,
    /// Link whose events are currently accepted.
    link: Option<LinkId>,
    connect_timeout: Option<Duration>,
    connecting_since: Option<Instant>,
    baud_selection: usize,
    /// Lines scrolled back from the bottom; 0 follows new output.
    scroll_offset: usize,
}

impl App {
    pub fn new(transport: Box<dyn Transport>, config: &Config) -> Self {
        let session = SessionState::new(config.serial.baud_rate);
        Self {
            should_quit: false,
            focus: Focus::Terminal,
            baud_selection: session.baud_rate.index(),
            session,
            transport,
            link: None,
            connect_timeout: config.serial.connect_timeout(),
            connecting_since: None,
            scroll_offset: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.session.status
    }

    pub fn port_label(&self) -> String {
        self.transport.describe()
    }

    pub fn show_popup(&self) -> bool {
        matches!(self.focus, Focus::Popup(_))
    }

    pub fn popup_kind(&self) -> Option<PopupKind> {
        match self.focus {
            Focus::Popup(kind) => Some(kind),
            Focus::Terminal => None,
        }
    }

    pub fn focus_is_terminal(&self) -> bool {
        self.focus == Focus::Terminal
    }

    pub fn close_popup(&mut self) {
        self.focus = Focus::Terminal;
    }

    // ========================================================================
    // Session methods (MVI pattern)
    // ========================================================================

    /// Dispatch an intent to the session reducer and apply its effects.
    pub fn dispatch(&mut self, intent: SessionIntent) {
        let effects = dispatch_mvi!(self, session, SessionReducer, intent);
        for effect in effects {
            self.apply(effect);
        }

        match self.session.status {
            ConnectionStatus::Connecting => {
                self.connecting_since.get_or_insert_with(Instant::now);
            }
            _ => self.connecting_since = None,
        }
    }

    fn apply(&mut self, effect: SessionEffect) {
        match effect {
            SessionEffect::Open { baud_rate } => {
                let link = self.transport.open(baud_rate);
                info!(%link, %baud_rate, "connect requested");
                self.link = Some(link);
            }
            SessionEffect::Close => {
                info!("disconnect requested");
                self.transport.close();
            }
            SessionEffect::Write { data } => self.transport.write(&data),
            SessionEffect::FocusView => self.focus = Focus::Terminal,
            SessionEffect::ScrollToBottom => self.scroll_offset = 0,
        }
    }

    pub fn connect(&mut self) {
        self.dispatch(SessionIntent::UserConnect);
    }

    pub fn disconnect(&mut self) {
        self.dispatch(SessionIntent::UserDisconnect);
    }

    /// Single connect/disconnect/reconnect action, depending on status.
    pub fn toggle_connection(&mut self) {
        match self.session.status {
            ConnectionStatus::Connected => self.disconnect(),
            ConnectionStatus::Connecting => {}
            ConnectionStatus::Disconnected | ConnectionStatus::Errored(_) => self.connect(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        self.dispatch(SessionIntent::KeyPressed(key));
    }

    pub fn on_transport_event(&mut self, link: LinkId, event: TransportEvent) {
        if self.link != Some(link) {
            debug!(%link, ?event, "ignoring event from stale link");
            return;
        }

        let intent = match event {
            TransportEvent::Opened => SessionIntent::TransportOpened,
            TransportEvent::Closed => SessionIntent::TransportClosed,
            TransportEvent::Data(chunk) => SessionIntent::DataReceived(chunk),
            TransportEvent::Error(message) => {
                warn!(%link, %message, "transport error");
                SessionIntent::TransportError(message)
            }
        };
        self.dispatch(intent);
    }

    pub fn on_tick(&mut self) {
        self.expire_connect(Instant::now());
    }

    /// Abandon a connect attempt that has been pending longer than the
    /// configured timeout. Late events from that link are ignored.
    pub fn expire_connect(&mut self, now: Instant) {
        let (Some(timeout), Some(since)) = (self.connect_timeout, self.connecting_since) else {
            return;
        };
        if now.saturating_duration_since(since) < timeout {
            return;
        }

        warn!(timeout_secs = timeout.as_secs(), "connect timed out");
        self.link = None;
        self.transport.close();
        self.dispatch(SessionIntent::TransportError(format!(
            "timed out after {}s waiting for the port to open",
            timeout.as_secs()
        )));
    }

    /// Close an active link before exit.
    pub fn shutdown(&mut self) {
        if matches!(
            self.session.status,
            ConnectionStatus::Connected | ConnectionStatus::Connecting
        ) {
            self.transport.close();
        }
    }

    // ========================================================================
    // Baud picker
    // ========================================================================

    /// Open the baud picker. Refused while the rate is locked.
    pub fn open_baud_picker(&mut self) -> bool {
        if !self.session.status.is_baud_editable() {
            return false;
        }
        self.baud_selection = self.session.baud_rate.index();
        self.focus = Focus::Popup(PopupKind::BaudPicker);
        true
    }

    pub fn baud_selection(&self) -> usize {
        self.baud_selection
    }

    pub fn move_baud_selection(&mut self, direction: i32) {
        let len = BaudRate::SUPPORTED.len();
        let current = self.baud_selection.min(len - 1);
        self.baud_selection = if direction.is_negative() {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        } else if current + 1 >= len {
            0
        } else {
            current + 1
        };
    }

    pub fn confirm_baud_selection(&mut self) -> bool {
        self.select_baud_by_index(self.baud_selection + 1)
    }

    /// Pick a rate by its 1-based position in the picker.
    pub fn select_baud_by_index(&mut self, index: usize) -> bool {
        let Some(rate) = index
            .checked_sub(1)
            .and_then(|i| BaudRate::SUPPORTED.get(i))
        else {
            return false;
        };
        self.dispatch(SessionIntent::BaudRateChanged(rate.to_string()));
        self.close_popup();
        true
    }

    // ========================================================================
    // Scrollback
    // ========================================================================

    /// Scroll up (view older content).
    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.session.lines.len();
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max);
    }

    /// Scroll down (view newer content).
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Reset scrollback to live view.
    pub fn reset_scrollback(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }
}
