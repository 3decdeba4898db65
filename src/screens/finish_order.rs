//! Finish step: review the order and send it to the kitchen.

use crate::components::{Footer, Header, HEADER_HEIGHT};
use crate::dispatch::{ApiRequest, ApiResponse};
use crate::keymap::Action;
use crate::models::{OrderItem, OrderTicket};
use crate::screens::screen_trait::{RenderContext, Route, Screen, ScreenAction, ScreenContext};
use crate::screens::{key_input, KeyInput};
use crate::styles::theme;
use crate::utils::{center_popup, create_standard_layout};
use crate::widgets::{Spinner, Toast};
use anyhow::Result;
use crossterm::event::Event;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tracing::info;

pub struct FinishOrderScreen {
    ticket: OrderTicket,
    items: Vec<OrderItem>,
    sending: bool,
    spinner: Spinner,
}

impl FinishOrderScreen {
    pub fn new(ticket: OrderTicket, items: Vec<OrderItem>) -> Self {
        Self {
            ticket,
            items,
            sending: false,
            spinner: Spinner::new(),
        }
    }

    fn total_units(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }
}

impl Screen for FinishOrderScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header, body, footer) = create_standard_layout(area, HEADER_HEIGHT);
        let user = ctx.auth.session().map(|s| s.name.as_str());
        Header::render(frame, header, "Finish order", user);

        let height = (self.items.len() as u16).min(12) + 6;
        let card = center_popup(body, 60, height);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(format!(" Table {} ", self.ticket.number))
            .title_style(t.title_style());

        let mut lines: Vec<Line> = self
            .items
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled(format!("{:>3} × ", item.amount), t.emphasis_style()),
                    Span::styled(item.name.as_str(), t.text_style()),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::styled(
            format!("{} items, {} units", self.items.len(), self.total_units()),
            t.muted_style(),
        ));
        lines.push(Line::default());
        let status = if self.sending {
            Line::styled(self.spinner.label(true, "Sending to the kitchen"), t.muted_style())
        } else {
            Line::styled("Send this order to the kitchen?", t.success_style())
        };
        lines.push(status);

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            card,
        );

        let keymap = &ctx.config.keymap;
        Footer::render(
            frame,
            footer,
            &[
                format!("Send: {}", keymap.key_for(Action::Confirm)),
                keymap.hint(Action::Cancel),
            ],
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        let KeyInput::Action(action) = key_input(key, ctx, |_| false) else {
            return Ok(ScreenAction::None);
        };
        Ok(match action {
            Action::Quit => ScreenAction::Quit,
            _ if self.sending => ScreenAction::None,
            Action::Confirm | Action::FinishOrder => {
                self.sending = true;
                ScreenAction::Request(ApiRequest::SendOrder {
                    order_id: self.ticket.order_id.clone(),
                })
            }
            Action::Cancel => ScreenAction::Back,
            Action::SignOut => ScreenAction::SignOut,
            _ => ScreenAction::None,
        })
    }

    fn handle_response(
        &mut self,
        response: ApiResponse,
        _ctx: &ScreenContext,
    ) -> Result<ScreenAction> {
        let ApiResponse::OrderSent { order_id, result } = response else {
            return Ok(ScreenAction::None);
        };
        self.sending = false;
        Ok(match result {
            Ok(()) => {
                info!("Sent order {} for table {}", order_id, self.ticket.number);
                ScreenAction::Batch(vec![
                    ScreenAction::Notify(Toast::success(format!(
                        "Order for table {} sent",
                        self.ticket.number
                    ))),
                    ScreenAction::Reset(Route::Dashboard),
                ])
            }
            Err(e) => ScreenAction::error(format!("Could not send the order: {}", e)),
        })
    }
}
