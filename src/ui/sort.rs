//! Sort control
//!
//! Shows the active sort key. Holds no state of its own; cycling the key is an
//! orchestrator operation and only changes how lists are displayed.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::SortKey;
use crate::ui::Theme;

/// Render "Sort by: <key>" with the other options dimmed
pub fn render_sort_control(frame: &mut Frame, area: Rect, active: SortKey, theme: &Theme) {
    let mut spans = vec![Span::styled("Sort by: ", theme.dimmed())];
    for (i, key) in SortKey::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", theme.dimmed()));
        }
        let style = if *key == active {
            theme.accent()
        } else {
            theme.dimmed()
        };
        spans.push(Span::styled(key.to_string(), style));
    }

    let control = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border())
                .title(Span::styled(" o ", theme.keybind())),
        );
    frame.render_widget(control, area);
}
