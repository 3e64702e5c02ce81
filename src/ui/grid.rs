//! Result grid
//!
//! Renders movie cards for search results or the watch list. Pure rendering:
//! the grid reads a snapshot and never fetches or mutates anything.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::models::{MovieSummary, Watchlist, POSTER_SIZE};
use crate::ui::Theme;

/// Terminal rows per card
pub const CARD_HEIGHT: usize = 3;

/// Everything the grid needs for one frame
#[derive(Debug)]
pub struct ResultGrid<'a> {
    /// Border title, e.g. "RESULTS"
    pub title: &'a str,
    /// Movies in display order
    pub movies: &'a [&'a MovieSummary],
    /// Used for the membership marker on each card
    pub watchlist: &'a Watchlist,
    /// Selected card index, if the grid has focus
    pub selected: Option<usize>,
    pub focused: bool,
    /// Optional line under the cards (loading more, load hint)
    pub footer: Option<String>,
    /// Text shown when there are no cards
    pub empty_text: &'a str,
}

impl<'a> ResultGrid<'a> {
    /// First card to draw so that the selection stays visible
    pub fn scroll_offset(selected: usize, visible_cards: usize) -> usize {
        if visible_cards == 0 {
            return selected;
        }
        (selected + 1).saturating_sub(visible_cards)
    }

    /// Render the grid
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border_style = if self.focused {
            theme.border_focused()
        } else {
            theme.border()
        };

        let title = match self.selected {
            Some(sel) if !self.movies.is_empty() => {
                format!(" {} ({}/{}) ", self.title, sel + 1, self.movies.len())
            }
            _ => format!(" {} ({}) ", self.title, self.movies.len()),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(title, theme.title()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.movies.is_empty() {
            let mut lines = vec![Line::from(""), Line::from(Span::styled(self.empty_text, theme.dimmed()))];
            if let Some(footer) = &self.footer {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(footer.clone(), theme.loading())));
            }
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
            return;
        }

        let footer_rows = u16::from(self.footer.is_some());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(footer_rows)])
            .split(inner);

        let visible_cards = chunks[0].height as usize / CARD_HEIGHT;
        let offset = Self::scroll_offset(self.selected.unwrap_or(0), visible_cards);
        let width = chunks[0].width as usize;

        let items: Vec<ListItem> = self
            .movies
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible_cards.max(1))
            .map(|(i, movie)| self.render_card(i, movie, width, theme))
            .collect();

        frame.render_widget(List::new(items).style(theme.text()), chunks[0]);

        if let Some(footer) = &self.footer {
            let footer = Paragraph::new(footer.clone())
                .style(theme.loading())
                .alignment(Alignment::Center);
            frame.render_widget(footer, chunks[1]);
        }
    }

    /// One card: headline, overview, poster link
    fn render_card(
        &self,
        index: usize,
        movie: &MovieSummary,
        width: usize,
        theme: &Theme,
    ) -> ListItem<'static> {
        let is_selected = self.selected == Some(index);
        let saved = self.watchlist.contains(movie.id);

        let marker = if is_selected { "▸ " } else { "  " };
        let year_str = movie
            .year()
            .map(|y| format!(" ({})", y))
            .unwrap_or_else(|| " (N/A)".to_string());

        let headline = Line::from(vec![
            Span::styled(
                marker.to_string(),
                if is_selected { theme.accent() } else { theme.dimmed() },
            ),
            Span::styled(
                movie.title.clone(),
                if is_selected { theme.highlighted() } else { theme.text() },
            ),
            Span::styled(year_str, theme.year()),
            Span::raw(" "),
            Span::styled(format!("★ {}", movie.rating_label()), theme.rating(movie.vote_average)),
            Span::raw(" "),
            if saved {
                Span::styled("✓ saved", theme.saved())
            } else {
                Span::styled("+ add", theme.dimmed())
            },
        ]);

        let body_width = width.saturating_sub(4);
        let overview = Line::from(Span::styled(
            format!("    {}", truncate(movie.overview_or_default(), body_width)),
            theme.text(),
        ));
        let poster = Line::from(Span::styled(
            format!("    {}", truncate(&movie.poster_url(POSTER_SIZE), body_width)),
            theme.dimmed(),
        ));

        ListItem::new(vec![headline, overview, poster])
    }
}

/// Cut a string to `max` chars, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() <= max {
        return first_line.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = first_line.chars().take(max - 1).collect();
    out.push('…');
    out
}
