//! Terminal UI components
//!
//! Built with ratatui. Every renderer reads an `&App` snapshot; none of them
//! mutate state or start requests.

pub mod grid;
pub mod search;
pub mod sort;
pub mod theme;
pub mod trailer;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, Focus, InputMode, SearchPhase};
use grid::ResultGrid;

/// Share of the content width given to the results grid
const RESULTS_PERCENT: u16 = 65;

/// Render the whole screen
pub fn render_app(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = app.theme();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(theme.base()), area);

    // Main layout: header, sort control, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Sort control
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app, &theme);
    sort::render_sort_control(frame, chunks[1], app.sort, &theme);
    render_content(frame, chunks[2], app, &theme);
    render_status_bar(frame, chunks[3], app, &theme);

    trailer::render_trailer_overlay(
        frame,
        area,
        &app.trailer,
        app.trailer_title.as_deref(),
        &theme,
    );

    if let Some(notice) = &app.notice {
        render_notice_popup(frame, area, notice, &theme);
    }
}

/// Logo, search box, dark mode indicator
fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Logo
            Constraint::Min(1),     // Search box
            Constraint::Length(12), // Mode toggle
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::raw("🎬 "),
        Span::styled("STREAM", theme.title()),
        Span::styled("IFY", theme.secondary().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    app.search_input.render(frame, header_chunks[1], theme);

    let mode = if app.preferences.dark_mode {
        "☾ Dark"
    } else {
        "☀ Light"
    };
    let toggle = Paragraph::new(Span::styled(mode, theme.accent()))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border())
                .title(Span::styled(" m ", theme.keybind())),
        );
    frame.render_widget(toggle, header_chunks[2]);
}

/// Results grid beside the watch list
fn render_content(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(RESULTS_PERCENT),
            Constraint::Percentage(100 - RESULTS_PERCENT),
        ])
        .split(area);

    let results = app.visible_results();
    let results_focused = app.focus == Focus::Results && app.input_mode == InputMode::Normal;
    let (empty_text, footer) = results_status(app);
    ResultGrid {
        title: "RESULTS",
        movies: &results,
        watchlist: &app.watchlist,
        selected: (app.focus == Focus::Results).then_some(app.results_list.selected),
        focused: results_focused,
        footer,
        empty_text,
    }
    .render(frame, columns[0], theme);

    let saved = app.visible_watchlist();
    let watchlist_focused = app.focus == Focus::Watchlist && app.input_mode == InputMode::Normal;
    ResultGrid {
        title: "WATCH LIST",
        movies: &saved,
        watchlist: &app.watchlist,
        selected: (app.focus == Focus::Watchlist).then_some(app.watchlist_list.selected),
        focused: watchlist_focused,
        footer: None,
        empty_text: "Nothing saved yet. Press a to add.",
    }
    .render(frame, columns[1], theme);
}

/// Empty-grid text and footer line for the current search phase
fn results_status(app: &App) -> (&'static str, Option<String>) {
    let message = app.search.loading.message().map(str::to_string);

    match app.phase() {
        SearchPhase::Loading => ("", message),
        SearchPhase::LoadingMore => ("", Some("⟳ Loading more movies...".to_string())),
        SearchPhase::Loaded if app.search.results.is_empty() => ("No movies found", None),
        SearchPhase::Loaded => (
            "",
            app.search
                .has_more
                .then(|| "▼ Scroll down or press n for more".to_string()),
        ),
        SearchPhase::Error if app.search.results.is_empty() => ("Search failed", message),
        SearchPhase::Error => ("", message),
        SearchPhase::Idle => ("Type / to search movies", None),
    }
}

/// Mode, search state and key hints
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(theme.background).bg(theme.primary),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(theme.background).bg(theme.accent),
        ),
    };

    let phase = match app.phase() {
        SearchPhase::Idle => "IDLE".to_string(),
        SearchPhase::Loading => "SEARCHING".to_string(),
        SearchPhase::LoadingMore => format!("PAGE {}…", app.search.page),
        SearchPhase::Loaded => format!("{} MOVIES", app.search.results.len()),
        SearchPhase::Error => "ERROR".to_string(),
    };
    let state_indicator = Span::styled(format!(" {} ", phase), theme.dimmed());

    let saved = Span::styled(format!(" ♥ {} ", app.watchlist.len()), theme.saved());

    let help = match app.input_mode {
        InputMode::Editing => " Enter:search  ESC:done  ^U:clear ",
        InputMode::Normal => " q:quit  /:search  t:trailer  a/d:watch list  o:sort  m:theme ",
    };

    let status_line = Line::from(vec![
        mode_indicator,
        state_indicator,
        saved,
        Span::raw(" │ "),
        Span::styled(help, theme.dimmed()),
    ]);

    let status = Paragraph::new(status_line).style(theme.status_bar());
    frame.render_widget(status, area);
}

/// Transient notice, dismissed by any key
fn render_notice_popup(frame: &mut Frame, area: Rect, notice: &str, theme: &Theme) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let notice_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(notice, theme.warning())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(theme.warning())
            .title(Span::styled(" ! NOTICE ", theme.warning()))
            .style(theme.base()),
    );

    frame.render_widget(notice_block, popup_area);
}
