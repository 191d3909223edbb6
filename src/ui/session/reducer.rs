//! Reducer for the serial session.

use crate::baud::BaudRate;
use crate::ui::mvi::Reducer;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::intent::{SessionEffect, SessionIntent};
use super::state::{ConnectionStatus, SessionState};

/// Prefix for transport failures written into the log.
pub const ERROR_MARKER: &str = "⚠ ";

/// Reducer for session state transitions.
///
/// Pure function. Opening, closing and writing to the port happen in the
/// caller, driven by the returned [`SessionEffect`]s.
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;
    type Effect = SessionEffect;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> (Self::State, Vec<Self::Effect>) {
        let mut effects = Vec::new();

        match intent {
            SessionIntent::UserConnect => {
                if state.status.can_connect() {
                    state.status = ConnectionStatus::Connecting;
                    state.lines.discard_tail();
                    effects.push(SessionEffect::Open {
                        baud_rate: state.baud_rate,
                    });
                }
            }

            SessionIntent::UserDisconnect => {
                if state.status.is_connected() {
                    effects.push(SessionEffect::Close);
                }
            }

            SessionIntent::TransportOpened => {
                if state.status == ConnectionStatus::Connecting {
                    state.status = ConnectionStatus::Connected;
                    effects.push(SessionEffect::FocusView);
                }
            }

            SessionIntent::TransportClosed => {
                if state.status.is_connected() {
                    state.status = ConnectionStatus::Disconnected;
                    end_session(&mut state);
                }
            }

            SessionIntent::TransportError(message) => {
                if matches!(
                    state.status,
                    ConnectionStatus::Connecting | ConnectionStatus::Connected
                ) {
                    state.lines.push_line(format!("{ERROR_MARKER}{message}"));
                    state.status = ConnectionStatus::Errored(message);
                    end_session(&mut state);
                    effects.push(SessionEffect::ScrollToBottom);
                }
            }

            SessionIntent::DataReceived(chunk) => {
                if state.status.is_connected() && state.lines.ingest(&chunk).should_scroll() {
                    effects.push(SessionEffect::ScrollToBottom);
                }
            }

            SessionIntent::KeyPressed(key) => {
                if state.status.is_connected() {
                    apply_key(&mut state, key, &mut effects);
                }
            }

            SessionIntent::BaudRateChanged(text) => {
                if state.status.is_baud_editable() {
                    if let Ok(rate) = text.parse::<BaudRate>() {
                        state.baud_rate = rate;
                    }
                }
            }
        }

        (state, effects)
    }
}

/// Keystrokes the prompt line understands.
enum PromptKey {
    Submit,
    Erase,
    Insert(char),
}

fn classify(key: KeyEvent) -> Option<PromptKey> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    // Modified keys are shortcuts, never prompt text.
    let shortcut =
        KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META;
    if key.modifiers.intersects(shortcut) {
        return None;
    }
    match key.code {
        KeyCode::Enter => Some(PromptKey::Submit),
        KeyCode::Backspace => Some(PromptKey::Erase),
        KeyCode::Char(ch) if !ch.is_control() => Some(PromptKey::Insert(ch)),
        _ => None,
    }
}

fn apply_key(state: &mut SessionState, key: KeyEvent, effects: &mut Vec<SessionEffect>) {
    match classify(key) {
        Some(PromptKey::Submit) => {
            let mut data = std::mem::take(&mut state.pending_input);
            data.push('\n');
            effects.push(SessionEffect::Write { data });
            effects.push(SessionEffect::ScrollToBottom);
        }
        Some(PromptKey::Erase) => {
            state.pending_input.pop();
            effects.push(SessionEffect::ScrollToBottom);
        }
        Some(PromptKey::Insert(ch)) => {
            state.pending_input.push(ch);
            effects.push(SessionEffect::ScrollToBottom);
        }
        None => {}
    }
}

/// Leaving `Connected`: the partial line is incomplete by construction and
/// the prompt belongs to the session that just ended.
fn end_session(state: &mut SessionState) {
    state.lines.discard_tail();
    state.pending_input.clear();
}
