use crate::ui::app::{App, PopupKind};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Lines moved per PageUp/PageDown.
pub const SCROLL_STEP: usize = 10;

/// Route a key press: client hotkeys first, everything else to the session.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    if app.show_popup() {
        handle_popup_key(app, key);
        return;
    }

    if is_ctrl_char(key, 'o') {
        app.toggle_connection();
        return;
    }
    if is_ctrl_char(key, 'b') {
        app.open_baud_picker();
        return;
    }

    match key.code {
        KeyCode::PageUp => app.scroll_up(SCROLL_STEP),
        KeyCode::PageDown => app.scroll_down(SCROLL_STEP),
        KeyCode::End if key.modifiers.is_empty() => app.reset_scrollback(),
        _ => app.on_key(key),
    }
}

fn handle_popup_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc) || is_ctrl_char(key, 'b') {
        app.close_popup();
        return;
    }

    if matches!(app.popup_kind(), Some(PopupKind::BaudPicker)) {
        match key.code {
            KeyCode::Up => app.move_baud_selection(-1),
            KeyCode::Down => app.move_baud_selection(1),
            KeyCode::Enter => {
                app.confirm_baud_selection();
            }
            KeyCode::Char(ch) => {
                if let Some(index) = ch.to_digit(10) {
                    app.select_baud_by_index(index as usize);
                }
            }
            _ => {}
        }
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
