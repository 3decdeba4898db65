use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Common footer: key hints separated by " | ".
pub struct Footer;

impl Footer {
    /// Render `hints`, each of the form "Label: Key". The label is drawn in
    /// the primary color and the key emphasized.
    pub fn render(frame: &mut Frame, area: Rect, hints: &[String]) {
        frame.render_widget(
            Paragraph::new(Self::line(hints)).alignment(Alignment::Center),
            area,
        );
    }

    fn line(hints: &[String]) -> Line<'_> {
        let t = theme();
        let mut spans = Vec::new();
        for (i, hint) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", t.muted_style()));
            }
            match hint.split_once(": ") {
                Some((label, key)) => {
                    spans.push(Span::styled(format!("{}: ", label), t.title_style()));
                    spans.push(Span::styled(key, t.emphasis_style()));
                }
                None => spans.push(Span::styled(hint.as_str(), t.text_style())),
            }
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_line_text() {
        let hints = vec!["Add: A".to_string(), "Quit: Ctrl+C".to_string()];
        let line = Footer::line(&hints);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Add: A | Quit: Ctrl+C");
    }
}
