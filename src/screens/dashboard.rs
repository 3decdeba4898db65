//! Dashboard: open an order for a table.

use crate::components::{Footer, Header, HEADER_HEIGHT};
use crate::dispatch::{ApiRequest, ApiResponse};
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Route, Screen, ScreenAction, ScreenContext};
use crate::screens::{key_input, KeyInput};
use crate::styles::theme;
use crate::utils::{center_popup, create_standard_layout, TextInput};
use crate::widgets::{Spinner, TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::Event;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Table,
    Name,
}

/// Parse a table number: a whole number greater than zero.
pub fn parse_table(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok().filter(|table| *table > 0)
}

pub struct DashboardScreen {
    table: TextInput,
    /// Optional customer name sent with the order
    name: TextInput,
    focus: Field,
    opening: bool,
    spinner: Spinner,
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            table: TextInput::digits(),
            name: TextInput::new(),
            focus: Field::Table,
            opening: false,
            spinner: Spinner::new(),
        }
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            Field::Table => &mut self.table,
            Field::Name => &mut self.name,
        }
    }

    fn open_order(&mut self) -> ScreenAction {
        if self.opening {
            return ScreenAction::None;
        }
        let Some(table) = parse_table(self.table.text()) else {
            return ScreenAction::error("Enter a table number greater than zero");
        };
        let name = Some(self.name.text_trimmed().to_string()).filter(|n| !n.is_empty());
        self.opening = true;
        ScreenAction::Request(ApiRequest::OpenOrder { table, name })
    }
}

impl Screen for DashboardScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header, body, footer) = create_standard_layout(area, HEADER_HEIGHT);
        let user = ctx.auth.session().map(|s| s.name.as_str());
        Header::render(frame, header, "New order", user);

        let form = center_popup(body, 50, 10);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Open a table ")
            .title_style(t.title_style());
        let inner = block.inner(form);
        frame.render_widget(block, form);

        let [table_area, name_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_text_input_widget(
            TextInputWidget::new(&self.table)
                .title("Table")
                .placeholder("Table number")
                .focused(self.focus == Field::Table)
                .disabled(self.opening),
            table_area,
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.name)
                .title("Customer (optional)")
                .focused(self.focus == Field::Name)
                .disabled(self.opening),
            name_area,
        );
        if self.opening {
            frame.render_widget(
                Paragraph::new(self.spinner.label(true, "Opening order"))
                    .style(t.muted_style())
                    .alignment(Alignment::Center),
                status_area,
            );
        }

        let keymap = &ctx.config.keymap;
        Footer::render(
            frame,
            footer,
            &[
                format!("Open order: {}", keymap.key_for(Action::Confirm)),
                keymap.hint(Action::NextField),
                keymap.hint(Action::SignOut),
                format!("Quit: {}", keymap.key_for(Action::Quit)),
            ],
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        let opening = self.opening;
        let input = key_input(key, ctx, |c| !opening && self.focused_input().insert_char(c));
        let KeyInput::Action(action) = input else {
            return Ok(ScreenAction::None);
        };

        Ok(match action {
            Action::Quit => ScreenAction::Quit,
            Action::SignOut => ScreenAction::SignOut,
            _ if self.opening => ScreenAction::None,
            Action::NextField | Action::PrevField | Action::MoveUp | Action::MoveDown => {
                self.focus = match self.focus {
                    Field::Table => Field::Name,
                    Field::Name => Field::Table,
                };
                ScreenAction::None
            }
            Action::Confirm => self.open_order(),
            other => {
                self.focused_input().handle_action(other);
                ScreenAction::None
            }
        })
    }

    fn handle_response(
        &mut self,
        response: ApiResponse,
        _ctx: &ScreenContext,
    ) -> Result<ScreenAction> {
        let ApiResponse::OrderOpened(result) = response else {
            return Ok(ScreenAction::None);
        };
        self.opening = false;
        Ok(match result {
            Ok(ticket) => {
                info!("Opened order {} for table {}", ticket.order_id, ticket.number);
                self.table.clear();
                self.name.clear();
                self.focus = Field::Table;
                ScreenAction::Navigate(Route::Order(ticket))
            }
            Err(e) => ScreenAction::error(format!("Could not open the table: {}", e)),
        })
    }

    fn is_input_focused(&self) -> bool {
        !self.opening
    }
}
