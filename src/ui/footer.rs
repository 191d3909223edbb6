use crate::ui::session::ConnectionStatus;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer<'a> {
    status: &'a ConnectionStatus,
}

impl<'a> Footer<'a> {
    pub fn new(status: &'a ConnectionStatus) -> Self {
        Self { status }
    }

    /// Hotkeys valid in the current state.
    pub fn hints(&self) -> String {
        let connect = match self.status {
            ConnectionStatus::Disconnected => Some("Ctrl+O: Connect"),
            ConnectionStatus::Connecting => None,
            ConnectionStatus::Connected => Some("Ctrl+O: Disconnect"),
            ConnectionStatus::Errored(_) => Some("Ctrl+O: Reconnect"),
        };

        let mut hints = Vec::new();
        hints.extend(connect);
        if self.status.is_baud_editable() {
            hints.push("Ctrl+B: Baud");
        }
        hints.push("PgUp/PgDn: Scroll");
        hints.push("Ctrl+Q: Quit");
        format!(" {}", hints.join(" │ "))
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let hints = self.hints();
        let version = format!("v{} ", VERSION);

        // Calculate padding using char count, not byte count (for Unicode)
        let hints_width = hints.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize; // minus borders
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version_width);

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
