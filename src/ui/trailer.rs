//! Trailer overlay
//!
//! Centered modal for the resolved trailer. The terminal cannot embed video,
//! so the overlay shows the watch URL and hands playback to a local player.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::models::TrailerState;
use crate::ui::Theme;

const OVERLAY_WIDTH: u16 = 70;
const OVERLAY_HEIGHT: u16 = 11;

/// Area the overlay occupies inside `area`; clicks outside it close the overlay
pub fn overlay_area(area: Rect) -> Rect {
    let width = OVERLAY_WIDTH.min(area.width.saturating_sub(4));
    let height = OVERLAY_HEIGHT.min(area.height.saturating_sub(2));

    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Render the overlay; draws nothing unless the trailer is visible
pub fn render_trailer_overlay(
    frame: &mut Frame,
    area: Rect,
    trailer: &TrailerState,
    title: Option<&str>,
    theme: &Theme,
) {
    let url = match (trailer.is_visible(), trailer.video_url()) {
        (true, Some(url)) => url,
        _ => return,
    };

    let popup = overlay_area(area);
    frame.render_widget(Clear, popup);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.unwrap_or("Trailer").to_string(),
            theme.title(),
        )),
        Line::from(""),
        Line::from(Span::styled(url.to_string(), theme.secondary())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  p ", theme.keybind()),
            Span::styled("Play  ", theme.dimmed()),
            Span::styled("  o ", theme.keybind()),
            Span::styled("Open in browser  ", theme.dimmed()),
            Span::styled("  ESC/x ", theme.keybind()),
            Span::styled("Close", theme.dimmed()),
        ]),
    ];

    let overlay = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(theme.border_focused())
                .title(Span::styled(" ▶ TRAILER ", theme.success()))
                .title_bottom(Span::styled(" × ", theme.error()))
                .style(theme.base()),
        );

    frame.render_widget(overlay, popup);
}
