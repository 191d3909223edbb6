use crate::ui::session::{SessionState, ERROR_MARKER};
use crate::ui::theme::{ACCENT, HEADER_TEXT, STATUS_ERROR};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use std::ops::Range;

const PROMPT: &str = "> ";

/// Scrollback log followed by the prompt line while connected.
pub struct LogView<'a> {
    session: &'a SessionState,
    scroll_offset: usize,
}

impl<'a> LogView<'a> {
    pub fn new(session: &'a SessionState, scroll_offset: usize) -> Self {
        Self {
            session,
            scroll_offset,
        }
    }

    fn total_rows(&self) -> usize {
        self.session.lines.len() + usize::from(self.session.status.is_connected())
    }

    /// Screen position for the hardware cursor at the end of the prompt,
    /// if the prompt is on screen.
    pub fn cursor(&self, area: Rect) -> Option<(u16, u16)> {
        if !self.session.status.is_connected() || area.width == 0 || area.height == 0 {
            return None;
        }
        let window = visible_window(self.total_rows(), area.height as usize, self.scroll_offset);
        let prompt_row = self.total_rows() - 1;
        if !window.contains(&prompt_row) {
            return None;
        }
        let column = PROMPT.chars().count() + self.session.pending_input.chars().count();
        let x = area.x + column.min(area.width.saturating_sub(1) as usize) as u16;
        let y = area.y + (prompt_row - window.start) as u16;
        Some((x, y))
    }
}

impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let window = visible_window(self.total_rows(), area.height as usize, self.scroll_offset);
        let log = self.session.lines.lines();

        let lines: Vec<Line> = window
            .map(|row| match log.get(row) {
                Some(text) if text.starts_with(ERROR_MARKER) => {
                    Line::styled(text.as_str(), Style::default().fg(STATUS_ERROR))
                }
                Some(text) => Line::styled(text.as_str(), Style::default().fg(HEADER_TEXT)),
                None => Line::from(vec![
                    Span::styled(PROMPT, Style::default().fg(ACCENT)),
                    Span::styled(
                        self.session.pending_input.as_str(),
                        Style::default().fg(HEADER_TEXT),
                    ),
                ]),
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}

/// Rows to show for `total` rows in a viewport of `height`, scrolled
/// `offset` rows up from the bottom.
pub fn visible_window(total: usize, height: usize, offset: usize) -> Range<usize> {
    let end = total.saturating_sub(offset.min(total.saturating_sub(height)));
    end.saturating_sub(height)..end
}
