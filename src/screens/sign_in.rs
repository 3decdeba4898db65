//! Sign-in screen: e-mail and password form.

use crate::components::{Footer, Header, HEADER_HEIGHT};
use crate::keymap::Action;
use crate::models::Credentials;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::screens::{key_input, KeyInput};
use crate::styles::theme;
use crate::utils::{center_popup, create_standard_layout, TextInput};
use crate::widgets::{Spinner, TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::Event;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    Password,
}

pub struct SignInScreen {
    email: TextInput,
    password: TextInput,
    focus: Field,
    spinner: Spinner,
}

impl Default for SignInScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SignInScreen {
    pub fn new() -> Self {
        Self {
            email: TextInput::new(),
            password: TextInput::new(),
            focus: Field::Email,
            spinner: Spinner::new(),
        }
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Email => Field::Password,
            Field::Password => Field::Email,
        };
    }

    fn submit(&mut self, ctx: &ScreenContext) -> ScreenAction {
        if ctx.auth.is_loading() {
            return ScreenAction::None;
        }
        ScreenAction::SignIn(Credentials::new(self.email.text(), self.password.text()))
    }
}

impl Screen for SignInScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header, body, footer) = create_standard_layout(area, HEADER_HEIGHT);
        Header::render(frame, header, "Sign in", None);

        let form = center_popup(body, 50, 12);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Waiter sign in ")
            .title_style(t.title_style());
        let inner = block.inner(form);
        frame.render_widget(block, form);

        let [email_area, password_area, _, button_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let loading = ctx.auth.is_loading();
        frame.render_text_input_widget(
            TextInputWidget::new(&self.email)
                .title("E-mail")
                .placeholder("you@restaurant.com")
                .focused(self.focus == Field::Email)
                .disabled(loading),
            email_area,
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.password)
                .title("Password")
                .masked(true)
                .focused(self.focus == Field::Password)
                .disabled(loading),
            password_area,
        );

        let button = self.spinner.label(loading, "[ Sign in ]");
        let style = if loading {
            t.disabled_style()
        } else {
            t.success_style().add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(button).style(style).alignment(Alignment::Center),
            button_area,
        );

        let keymap = &ctx.config.keymap;
        Footer::render(
            frame,
            footer,
            &[
                keymap.hint(Action::NextField),
                format!("Sign in: {}", keymap.key_for(Action::Confirm)),
                format!("Quit: {}", keymap.key_for(Action::Quit)),
            ],
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if ctx.auth.is_loading() {
            return Ok(match key_input(key, ctx, |_| false) {
                KeyInput::Action(Action::Quit) => ScreenAction::Quit,
                _ => ScreenAction::None,
            });
        }

        let input = key_input(key, ctx, |c| self.focused_input().insert_char(c));
        Ok(match input {
            KeyInput::Typed | KeyInput::Unbound => ScreenAction::None,
            KeyInput::Action(action) => match action {
                Action::NextField | Action::PrevField | Action::MoveUp | Action::MoveDown => {
                    self.toggle_focus();
                    ScreenAction::None
                }
                Action::Confirm => self.submit(ctx),
                Action::Quit => ScreenAction::Quit,
                other => {
                    self.focused_input().handle_action(other);
                    ScreenAction::None
                }
            },
        })
    }

    fn is_input_focused(&self) -> bool {
        true
    }
}
