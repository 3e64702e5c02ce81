//! Search input component
//!
//! Holds the local draft and cursor. Committing a query is left to the caller:
//! edits report what changed and the event loop debounces them.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::Theme;

/// What an edit did to the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftChange {
    /// Draft holds a non-blank query; schedule it
    Query(String),
    /// Draft is blank; nothing may be emitted
    Blank,
    /// Key did not change the draft
    Unchanged,
}

/// Search input state
#[derive(Debug, Default, Clone)]
pub struct SearchInput {
    /// Current draft
    draft: String,
    /// Cursor position, in chars
    cursor: usize,
    /// Whether the input has keyboard focus
    pub focused: bool,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the draft (cursor goes to the end)
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.cursor = self.draft.chars().count();
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) -> DraftChange {
        let idx = self.byte_index();
        self.draft.insert(idx, c);
        self.cursor += 1;
        self.change()
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) -> DraftChange {
        if self.cursor == 0 {
            return DraftChange::Unchanged;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.draft.remove(idx);
        self.change()
    }

    /// Delete character at cursor
    pub fn delete(&mut self) -> DraftChange {
        if self.cursor >= self.draft.chars().count() {
            return DraftChange::Unchanged;
        }
        let idx = self.byte_index();
        self.draft.remove(idx);
        self.change()
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.draft.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.draft.chars().count();
    }

    /// Clear the draft
    pub fn clear(&mut self) {
        self.draft.clear();
        self.cursor = 0;
    }

    /// Explicit submission: the trimmed draft, unless it is blank
    pub fn submit(&self) -> Option<String> {
        let trimmed = self.draft.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn change(&self) -> DraftChange {
        match self.submit() {
            Some(query) => DraftChange::Query(query),
            None => DraftChange::Blank,
        }
    }

    fn byte_index(&self) -> usize {
        self.draft
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.draft.len())
    }

    /// Render the search box
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let text = if self.focused {
            let (before, after) = self.draft.split_at(self.byte_index());
            format!("⌕ {}│{}", before, after)
        } else if self.draft.is_empty() {
            "⌕ Type / to search movies...".to_string()
        } else {
            format!("⌕ {}", self.draft)
        };

        let style = if self.focused {
            theme.input().fg(theme.primary)
        } else {
            theme.input()
        };

        let search_box = Paragraph::new(text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if self.focused {
                    theme.border_focused()
                } else {
                    theme.border()
                })
                .title(Span::styled(" SEARCH ", theme.title())),
        );
        frame.render_widget(search_box, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut input = SearchInput::new();
        for c in "hello".chars() {
            input.insert(c);
        }
        assert_eq!(input.draft(), "hello");
        assert_eq!(input.cursor(), 5);

        input.cursor_left();
        input.cursor_left();
        assert_eq!(input.insert('X'), DraftChange::Query("helXlo".into()));
        assert_eq!(input.cursor(), 4);

        input.backspace();
        assert_eq!(input.draft(), "hello");

        input.cursor_home();
        assert_eq!(input.delete(), DraftChange::Query("ello".into()));
        input.cursor_end();
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_multibyte_chars() {
        let mut input = SearchInput::new();
        input.insert('é');
        input.insert('t');
        input.insert('é');
        input.cursor_left();
        input.backspace();
        assert_eq!(input.draft(), "éé");
    }

    #[test]
    fn test_whitespace_draft_is_blank() {
        let mut input = SearchInput::new();
        assert_eq!(input.insert(' '), DraftChange::Blank);
        assert_eq!(input.insert(' '), DraftChange::Blank);
        assert_eq!(input.submit(), None);

        assert_eq!(input.insert('a'), DraftChange::Query("a".into()));
    }

    #[test]
    fn test_submit_trims() {
        let mut input = SearchInput::new();
        input.set_draft("  the matrix ");
        assert_eq!(input.submit(), Some("the matrix".into()));
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = SearchInput::new();
        assert_eq!(input.backspace(), DraftChange::Unchanged);
        assert_eq!(input.delete(), DraftChange::Unchanged);
    }
}
