use crate::baud::BaudRate;
use crate::ui::app::{App, PopupKind};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect_by_size, layout_regions};
use crate::ui::terminal::LogView;
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, HEADER_TEXT, POPUP_BORDER};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let session = app.session();

    let header_widget = Header::new(&session.status, app.port_label(), session.baud_rate);
    frame.render_widget(header_widget.widget(), header);

    frame.render_widget(Clear, body);
    let log_view = LogView::new(session, app.scroll_offset());
    let cursor = log_view.cursor(body);
    frame.render_widget(log_view, body);
    if app.focus_is_terminal() {
        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
    }

    let footer_widget = Footer::new(&session.status);
    frame.render_widget(footer_widget.widget(footer), footer);

    if let Some(PopupKind::BaudPicker) = app.popup_kind() {
        let mut lines = Vec::new();
        for (idx, rate) in BaudRate::SUPPORTED.iter().enumerate() {
            let current = *rate == session.baud_rate;
            let marker = if current { "●" } else { " " };
            let mut line = Line::from(vec![
                Span::styled(format!("{}. ", idx + 1), Style::default().fg(HEADER_TEXT)),
                Span::styled(format!("{:>6}", rate), Style::default().fg(HEADER_TEXT)),
                Span::raw(" "),
                Span::styled(marker, Style::default().fg(ACCENT)),
            ]);
            if idx == app.baud_selection() {
                line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
            }
            lines.push(line);
        }
        lines.push(Line::from(""));
        lines.push(Line::from("Up/Down: Move  Enter: Select  Esc: Close"));

        let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
        let popup_width = content_width.saturating_add(4);
        let popup_height = lines.len().saturating_add(2) as u16;
        let area = centered_rect_by_size(body, popup_width, popup_height);

        frame.render_widget(Clear, area);
        let popup = Block::default()
            .title(Span::styled("Baud Rate", Style::default().fg(ACCENT)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(POPUP_BORDER));
        frame.render_widget(Paragraph::new(lines).block(popup), area);
    }
}
