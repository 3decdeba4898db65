use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

/// Height of the header block.
pub const HEADER_HEIGHT: u16 = 3;

/// Common header: app name and screen title on the left, the signed-in
/// waiter on the right.
pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, title: &str, user: Option<&str>) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(30)]).areas(inner);

        let heading = Line::from(vec![
            Span::styled("tablepad", t.title_style()),
            Span::styled(" · ", t.muted_style()),
            Span::styled(title, t.text_style()),
        ]);
        frame.render_widget(Paragraph::new(heading), left);

        if let Some(user) = user {
            frame.render_widget(
                Paragraph::new(Span::styled(user, t.muted_style())).alignment(Alignment::Right),
                right,
            );
        }
    }
}
