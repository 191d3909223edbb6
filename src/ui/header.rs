use crate::baud::BaudRate;
use crate::ui::session::ConnectionStatus;
use crate::ui::theme::{
    GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_IDLE, STATUS_OK,
    STATUS_PENDING,
};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Status bar: connection state, device and line speed.
pub struct Header<'a> {
    status: &'a ConnectionStatus,
    port: String,
    baud_rate: BaudRate,
}

impl<'a> Header<'a> {
    pub fn new(status: &'a ConnectionStatus, port: String, baud_rate: BaudRate) -> Self {
        Self {
            status,
            port,
            baud_rate,
        }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let status_style = Style::default().fg(status_color(self.status));

        let status_text = match self.status {
            ConnectionStatus::Errored(message) => format!("Error: {message}"),
            other => other.label().to_string(),
        };
        let baud_text = if self.status.is_baud_editable() {
            format!("{} baud", self.baud_rate)
        } else {
            format!("{} baud (locked)", self.baud_rate)
        };

        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("●", status_style),
            Span::styled(" ", text_style),
            Span::styled(status_text, status_style),
            Span::styled("  │  ", separator_style),
            Span::styled(self.port.clone(), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(baud_text, text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

fn status_color(status: &ConnectionStatus) -> Color {
    match status {
        ConnectionStatus::Disconnected => STATUS_IDLE,
        ConnectionStatus::Connecting => STATUS_PENDING,
        ConnectionStatus::Connected => STATUS_OK,
        ConnectionStatus::Errored(_) => STATUS_ERROR,
    }
}
