//! Modal list picker used for the category and product choosers.

use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::utils::center_popup;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget,
};

/// Centered popup listing `items`, with the `ListState` selection
/// highlighted. While `loading` is set a placeholder replaces the list.
pub struct Picker<'a> {
    title: &'a str,
    items: Vec<&'a str>,
    loading: bool,
    empty_text: &'a str,
}

impl<'a> Picker<'a> {
    pub fn new(title: &'a str, items: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            title,
            items: items.into_iter().collect(),
            loading: false,
            empty_text: "Nothing to pick",
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }

    fn popup_area(&self, area: Rect) -> Rect {
        // Items plus borders, at least room for a placeholder line
        let rows = (self.items.len() as u16).clamp(1, 14);
        center_popup(area, 50, rows + 2)
    }
}

impl StatefulWidget for Picker<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ListState) {
        let t = theme();
        let popup = self.popup_area(area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(format!(" {} ", self.title))
            .title_style(t.title_style());

        if self.loading || self.items.is_empty() {
            let text = if self.loading { "Loading…" } else { self.empty_text };
            Paragraph::new(text)
                .style(t.muted_style())
                .alignment(Alignment::Center)
                .block(block)
                .render(popup, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|name| ListItem::new(*name).style(t.text_style()))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(t.highlight_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        StatefulWidget::render(list, popup, buf, state);
    }
}
