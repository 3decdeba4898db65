//! Order screen.
//!
//! Builds one table's order: pick a category, pick a product, type a
//! quantity and add it. Items the server acknowledged are listed below and
//! can be removed one by one. An empty order can be closed (deleted on the
//! server); a non-empty one moves on to the finish step.
//!
//! All bookkeeping lives in `OrderState`; this screen maps keys to its
//! operations and turns the outcomes into requests and toasts.

use crate::components::{Footer, Header, HEADER_HEIGHT};
use crate::dispatch::{ApiRequest, ApiResponse};
use crate::keymap::Action;
use crate::models::OrderTicket;
use crate::screens::screen_trait::{RenderContext, Route, Screen, ScreenAction, ScreenContext};
use crate::screens::{key_input, KeyInput};
use crate::state::{OrderState, Selection};
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::utils::{create_standard_layout, ListStateExt, TextInput};
use crate::widgets::{Picker, Spinner, TextInputWidget, TextInputWidgetExt, Toast};
use anyhow::Result;
use crossterm::event::Event;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};
use tracing::{debug, error, info};

/// Which modal picker is open. Only one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PickerKind {
    Category,
    Product,
}

pub struct OrderScreen {
    order: OrderState,
    amount: TextInput,
    items_state: ListState,
    picker: Option<PickerKind>,
    picker_state: ListState,
    closing: bool,
    spinner: Spinner,
}

impl OrderScreen {
    pub fn new(ticket: OrderTicket, default_amount: u32) -> Self {
        let mut amount = TextInput::digits();
        amount.set_text(default_amount.max(1).to_string());
        Self {
            order: OrderState::new(ticket),
            amount,
            items_state: ListState::default(),
            picker: None,
            picker_state: ListState::default(),
            closing: false,
            spinner: Spinner::new(),
        }
    }

    pub fn order(&self) -> &OrderState {
        &self.order
    }

    fn title(&self) -> String {
        format!("Table {}", self.order.ticket().number)
    }

    // ------------------------------------------------------------------
    // Key handling
    // ------------------------------------------------------------------

    fn open_picker(&mut self, kind: PickerKind) -> ScreenAction {
        // The trigger only works once something is selected
        let current = match kind {
            PickerKind::Category => self.order.category().selected().and_then(|c| {
                self.order.categories().iter().position(|x| x.id == c.id)
            }),
            PickerKind::Product => self
                .order
                .product()
                .selected()
                .and_then(|p| self.order.products().iter().position(|x| x.id == p.id)),
        };
        if let Some(index) = current {
            self.picker = Some(kind);
            self.picker_state.select(Some(index));
        }
        ScreenAction::None
    }

    fn handle_picker_action(&mut self, kind: PickerKind, action: Action) -> ScreenAction {
        let total = match kind {
            PickerKind::Category => self.order.categories().len(),
            PickerKind::Product => self.order.products().len(),
        };
        if self.picker_state.navigate(action, total) {
            return ScreenAction::None;
        }
        match action {
            Action::Confirm => {
                self.picker = None;
                let Some(index) = self.picker_state.selected() else {
                    return ScreenAction::None;
                };
                match kind {
                    PickerKind::Category => match self.order.select_category(index) {
                        Some(category_id) => {
                            ScreenAction::Request(ApiRequest::ListProducts { category_id })
                        }
                        None => ScreenAction::None,
                    },
                    PickerKind::Product => {
                        self.order.select_product(index);
                        ScreenAction::None
                    }
                }
            }
            Action::Cancel | Action::PickCategory | Action::PickProduct => {
                self.picker = None;
                ScreenAction::None
            }
            Action::Quit => ScreenAction::Quit,
            _ => ScreenAction::None,
        }
    }

    fn add_item(&mut self) -> ScreenAction {
        match self.order.prepare_add(self.amount.text()) {
            Ok(request) => ScreenAction::Request(ApiRequest::AddItem(request)),
            Err(e) => ScreenAction::error(e.to_string()),
        }
    }

    fn delete_highlighted(&mut self) -> ScreenAction {
        let Some(item) = self
            .items_state
            .selected()
            .and_then(|index| self.order.items().get(index))
        else {
            return ScreenAction::None;
        };
        let item_id = item.id.clone();
        if self.order.begin_delete(&item_id) {
            ScreenAction::Request(ApiRequest::DeleteItem { item_id })
        } else {
            ScreenAction::None
        }
    }

    fn close_order(&mut self) -> ScreenAction {
        if self.closing {
            return ScreenAction::None;
        }
        match self.order.close_request() {
            Ok(order_id) => {
                self.closing = true;
                ScreenAction::Request(ApiRequest::CloseOrder { order_id })
            }
            Err(e) => ScreenAction::error(e.to_string()),
        }
    }

    /// Fetch the menu again once loading has failed or come back empty.
    fn reload_menu(&mut self) -> ScreenAction {
        if self.order.category().is_loading() {
            return ScreenAction::None;
        }
        self.picker = None;
        self.order.reload_menu();
        ScreenAction::Request(ApiRequest::ListCategories)
    }

    fn finish_order(&self) -> ScreenAction {
        match self.order.finish() {
            Ok(ticket) => ScreenAction::Navigate(Route::FinishOrder {
                ticket,
                items: self.order.items().to_vec(),
            }),
            Err(e) => ScreenAction::error(e.to_string()),
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn selection_label<T>(selection: &Selection<T>, name: impl Fn(&T) -> &str) -> (String, Style) {
        let t = theme();
        match selection {
            Selection::Loading => ("Loading…".to_string(), t.muted_style()),
            Selection::Empty => ("None available".to_string(), t.disabled_style()),
            Selection::Selected(value) => (format!("{} ▾", name(value)), t.text_style()),
        }
    }

    fn render_pickers(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let [category_area, product_area, amount_area] = Layout::horizontal([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ])
        .areas(area);

        let field = |title: &str, focused: bool| {
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if focused {
                    t.border_focused_style()
                } else {
                    t.border_style()
                })
                .title(format!(" {} ", title))
        };

        let (label, style) = Self::selection_label(self.order.category(), |c| c.name.as_str());
        frame.render_widget(
            Paragraph::new(label)
                .style(style)
                .block(field("Category", self.picker == Some(PickerKind::Category))),
            category_area,
        );

        let (label, style) = Self::selection_label(self.order.product(), |p| p.name.as_str());
        frame.render_widget(
            Paragraph::new(label)
                .style(style)
                .block(field("Product", self.picker == Some(PickerKind::Product))),
            product_area,
        );

        frame.render_text_input_widget(
            TextInputWidget::new(&self.amount)
                .title("Qty")
                .focused(self.picker.is_none())
                .disabled(self.closing),
            amount_area,
        );
    }

    fn render_items(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let mut title = format!(" Items ({}) ", self.order.items().len());
        if self.order.pending_adds() > 0 {
            title.push_str(&self.spinner.label(true, "adding "));
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(title)
            .title_style(t.title_style());

        if self.order.items().is_empty() {
            frame.render_widget(
                Paragraph::new("No items yet")
                    .style(t.muted_style())
                    .alignment(Alignment::Center)
                    .block(block),
                area,
            );
            return;
        }

        let items: Vec<ListItem> = self
            .order
            .items()
            .iter()
            .map(|item| {
                let style = if self.order.is_deleting(&item.id) {
                    t.disabled_style().add_modifier(Modifier::CROSSED_OUT)
                } else {
                    t.text_style()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>3} × ", item.amount), t.emphasis_style()),
                    Span::styled(item.name.as_str(), style),
                ]))
            })
            .collect();

        self.items_state.clamp_to(self.order.items().len());
        frame.render_stateful_widget(
            List::new(items)
                .block(block)
                .highlight_style(t.highlight_style())
                .highlight_symbol(LIST_HIGHLIGHT_SYMBOL),
            area,
            &mut self.items_state,
        );
    }

    fn footer_hints(&self, ctx: &RenderContext) -> Vec<String> {
        let keymap = &ctx.config.keymap;
        if self.picker.is_some() {
            return vec![
                format!("Select: {}", keymap.key_for(Action::Confirm)),
                keymap.hint(Action::Cancel),
            ];
        }
        let mut hints = vec![
            keymap.hint(Action::PickCategory),
            keymap.hint(Action::PickProduct),
            keymap.hint(Action::AddItem),
        ];
        if !self.order.items().is_empty() {
            hints.push(keymap.hint(Action::DeleteItem));
        }
        if self.order.can_close() {
            hints.push(keymap.hint(Action::CloseOrder));
        }
        if self.order.can_finish() {
            hints.push(keymap.hint(Action::FinishOrder));
        }
        if self.order.category() == &Selection::Empty {
            hints.push(keymap.hint(Action::ReloadMenu));
        }
        hints.push(keymap.hint(Action::Cancel));
        hints
    }
}

impl Screen for OrderScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header, body, footer) = create_standard_layout(area, HEADER_HEIGHT);
        let user = ctx.auth.session().map(|s| s.name.as_str());
        Header::render(frame, header, &self.title(), user);

        let [pickers, items] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(body);
        self.render_pickers(frame, pickers);
        self.render_items(frame, items);

        match self.picker {
            Some(PickerKind::Category) => {
                let names = self.order.categories().iter().map(|c| c.name.as_str());
                frame.render_stateful_widget(
                    Picker::new("Category", names),
                    body,
                    &mut self.picker_state,
                );
            }
            Some(PickerKind::Product) => {
                let names = self.order.products().iter().map(|p| p.name.as_str());
                frame.render_stateful_widget(
                    Picker::new("Product", names).loading(self.order.product().is_loading()),
                    body,
                    &mut self.picker_state,
                );
            }
            None => {}
        }

        Footer::render(frame, footer, &self.footer_hints(ctx));
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };

        if let Some(kind) = self.picker {
            return Ok(match key_input(key, ctx, |_| false) {
                KeyInput::Action(action) => self.handle_picker_action(kind, action),
                _ => ScreenAction::None,
            });
        }

        let closing = self.closing;
        let input = key_input(key, ctx, |c| !closing && self.amount.insert_char(c));
        let KeyInput::Action(action) = input else {
            return Ok(ScreenAction::None);
        };

        Ok(match action {
            Action::Quit => ScreenAction::Quit,
            Action::SignOut => ScreenAction::SignOut,
            _ if self.closing => ScreenAction::None,
            Action::PickCategory => self.open_picker(PickerKind::Category),
            Action::PickProduct => self.open_picker(PickerKind::Product),
            Action::AddItem | Action::Confirm => self.add_item(),
            Action::DeleteItem => self.delete_highlighted(),
            Action::CloseOrder => self.close_order(),
            Action::FinishOrder => self.finish_order(),
            Action::ReloadMenu => self.reload_menu(),
            // Leaves the order open on the server
            Action::Cancel => ScreenAction::Back,
            other => {
                if !self.items_state.navigate(other, self.order.items().len()) {
                    self.amount.handle_action(other);
                }
                ScreenAction::None
            }
        })
    }

    fn handle_response(
        &mut self,
        response: ApiResponse,
        _ctx: &ScreenContext,
    ) -> Result<ScreenAction> {
        Ok(match response {
            ApiResponse::Categories(Ok(categories)) => {
                debug!("Loaded {} categories", categories.len());
                match self.order.load_categories(categories) {
                    Some(category_id) => {
                        ScreenAction::Request(ApiRequest::ListProducts { category_id })
                    }
                    None => ScreenAction::None,
                }
            }
            ApiResponse::Categories(Err(e)) => {
                self.order.categories_failed();
                ScreenAction::error(format!("Could not load categories: {}", e))
            }
            ApiResponse::Products {
                category_id,
                result: Ok(products),
            } => {
                if !self.order.load_products(&category_id, products) {
                    debug!("Discarding products for superseded category {}", category_id);
                }
                ScreenAction::None
            }
            ApiResponse::Products {
                category_id,
                result: Err(e),
            } => {
                if self.order.products_failed(&category_id) {
                    ScreenAction::error(format!("Could not load products: {}", e))
                } else {
                    ScreenAction::None
                }
            }
            ApiResponse::ItemAdded {
                request,
                result: Ok(item_id),
            } => {
                let item = self.order.confirm_added(request, item_id);
                info!("Added {} × {} as item {}", item.amount, item.name, item.id);
                let message = format!("Added {} × {}", item.amount, item.name);
                self.items_state.select_last_item(self.order.items().len());
                ScreenAction::Notify(Toast::success(message))
            }
            ApiResponse::ItemAdded {
                request,
                result: Err(e),
            } => {
                self.order.add_failed();
                ScreenAction::error(format!("Could not add {}: {}", request.product_name, e))
            }
            ApiResponse::ItemDeleted {
                item_id,
                result: Ok(()),
            } => {
                if self.order.confirm_deleted(&item_id) {
                    info!("Removed item {}", item_id);
                }
                self.items_state.clamp_to(self.order.items().len());
                ScreenAction::None
            }
            ApiResponse::ItemDeleted {
                item_id,
                result: Err(e),
            } => {
                self.order.delete_failed(&item_id);
                ScreenAction::error(format!("Could not remove the item: {}", e))
            }
            ApiResponse::OrderClosed {
                order_id,
                result: Ok(()),
            } => {
                info!("Closed order {}", order_id);
                ScreenAction::Batch(vec![
                    ScreenAction::Notify(Toast::info(format!("{} closed", self.title()))),
                    ScreenAction::Back,
                ])
            }
            ApiResponse::OrderClosed {
                order_id,
                result: Err(e),
            } => {
                self.closing = false;
                error!("Failed to close order {}: {}", order_id, e);
                ScreenAction::error(format!("Could not close the order: {}", e))
            }
            other => {
                debug!("Order screen ignoring {:?}", other);
                ScreenAction::None
            }
        })
    }

    fn is_input_focused(&self) -> bool {
        self.picker.is_none() && !self.closing
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::Request(ApiRequest::ListCategories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthContext;
    use crate::config::Config;
    use crate::error::ApiError;
    use crate::models::{Category, Product};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen() -> OrderScreen {
        OrderScreen::new(
            OrderTicket {
                number: 4,
                order_id: "order-1".to_string(),
            },
            1,
        )
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    /// Screen with categories and products loaded.
    fn loaded(ctx: &ScreenContext) -> OrderScreen {
        let mut screen = screen();
        let action = screen
            .handle_response(
                ApiResponse::Categories(Ok(vec![category("1", "Pizza"), category("2", "Drinks")])),
                ctx,
            )
            .unwrap();
        assert!(matches!(
            action,
            ScreenAction::Request(ApiRequest::ListProducts { ref category_id }) if category_id == "1"
        ));
        screen
            .handle_response(
                ApiResponse::Products {
                    category_id: "1".to_string(),
                    result: Ok(vec![product("10", "Margherita")]),
                },
                ctx,
            )
            .unwrap();
        screen
    }

    #[test]
    fn test_on_enter_requests_categories() {
        let config = Config::default();
        let auth = AuthContext::new();
        let ctx = ScreenContext::new(&config, &auth);
        let mut screen = screen();
        assert!(matches!(
            screen.on_enter(&ctx).unwrap(),
            ScreenAction::Request(ApiRequest::ListCategories)
        ));
        assert_eq!(screen.title(), "Table 4");
    }

    #[test]
    fn test_add_item_with_typed_amount() {
        let config = Config::default();
        let auth = AuthContext::new();
        let ctx = ScreenContext::new(&config, &auth);
        let mut screen = loaded(&ctx);

        // Replace the default "1" with "2"
        screen.handle_event(key(KeyCode::Backspace), &ctx).unwrap();
        screen.handle_event(key(KeyCode::Char('2')), &ctx).unwrap();

        let request = match screen.handle_event(key(KeyCode::Char('a')), &ctx).unwrap() {
            ScreenAction::Request(ApiRequest::AddItem(request)) => request,
            other => panic!("expected AddItem, got {:?}", other),
        };
        assert_eq!(request.order_id, "order-1");
        assert_eq!(request.product_id, "10");
        assert_eq!(request.amount, 2);

        let action = screen
            .handle_response(
                ApiResponse::ItemAdded {
                    request,
                    result: Ok("100".to_string()),
                },
                &ctx,
            )
            .unwrap();
        assert!(matches!(action, ScreenAction::Notify(_)));
        assert_eq!(screen.order().items().len(), 1);
        assert_eq!(screen.order().items()[0].id, "100");
        assert_eq!(screen.items_state.selected(), Some(0));
    }

    #[test]
    fn test_invalid_amount_sends_nothing() {
        let config = Config::default();
        let auth = AuthContext::new();
        let ctx = ScreenContext::new(&config, &auth);
        let mut screen = loaded(&ctx);

        screen.handle_event(key(KeyCode::Backspace), &ctx).unwrap();
        assert!(matches!(
            screen.handle_event(key(KeyCode::Char('+')), &ctx).unwrap(),
            ScreenAction::Notify(_)
        ));
        assert_eq!(screen.order().pending_adds(), 0);
    }

    #[test]
    fn test_category_picker_changes_products() {
        let config = Config::default();
        let auth = AuthContext::new();
        let ctx = ScreenContext::new(&config, &auth);
        let mut screen = loaded(&ctx);

        screen.handle_event(key(KeyCode::Char('c')), &ctx).unwrap();
        assert_eq!(screen.picker, Some(PickerKind::Category));
        assert!(!screen.is_input_focused());

        screen.handle_event(key(KeyCode::Down), &ctx).unwrap();
        let action = screen.handle_event(key(KeyCode::Enter), &ctx).unwrap();
        assert!(matches!(
            action,
            ScreenAction::Request(ApiRequest::ListProducts { ref category_id }) if category_id == "2"
        ));
        assert_eq!(screen.picker, None);
        assert!(screen.order().product().is_loading());

        // The picker trigger is inert while loading
        screen.handle_event(key(KeyCode::Char('p')), &ctx).unwrap();
        assert_eq!(screen.picker, None);
    }

    #[test]
    fn test_delete_then_close() {
        let config = Config::default();
        let auth = AuthContext::new();
        let ctx = ScreenContext::new(&config, &auth);
        let mut screen = loaded(&ctx);

        let request = match screen.add_item() {
            ScreenAction::Request(ApiRequest::AddItem(request)) => request,
            other => panic!("expected AddItem, got {:?}", other),
        };
        screen
            .handle_response(
                ApiResponse::ItemAdded {
                    request,
                    result: Ok("100".to_string()),
                },
                &ctx,
            )
            .unwrap();

        // Close is refused while the order has items
        assert!(matches!(
            screen.handle_event(key(KeyCode::Char('x')), &ctx).unwrap(),
            ScreenAction::Notify(_)
        ));

        let action = screen.handle_event(key(KeyCode::Char('d')), &ctx).unwrap();
        assert!(matches!(
            action,
            ScreenAction::Request(ApiRequest::DeleteItem { ref item_id }) if item_id == "100"
        ));
        // Second press while in flight is not re-sent
        assert!(matches!(
            screen.handle_event(key(KeyCode::Char('d')), &ctx).unwrap(),
            ScreenAction::None
        ));

        screen
            .handle_response(
                ApiResponse::ItemDeleted {
                    item_id: "100".to_string(),
                    result: Ok(()),
                },
                &ctx,
            )
            .unwrap();
        assert!(screen.order().items().is_empty());

        let action = screen.handle_event(key(KeyCode::Char('x')), &ctx).unwrap();
        assert!(matches!(
            action,
            ScreenAction::Request(ApiRequest::CloseOrder { ref order_id }) if order_id == "order-1"
        ));

        let action = screen
            .handle_response(
                ApiResponse::OrderClosed {
                    order_id: "order-1".to_string(),
                    result: Ok(()),
                },
                &ctx,
            )
            .unwrap();
        match action {
            ScreenAction::Batch(actions) => {
                assert!(matches!(actions.last(), Some(ScreenAction::Back)))
            }
            other => panic!("expected Batch, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_close_allows_retry() {
        let config = Config::default();
        let auth = AuthContext::new();
        let ctx = ScreenContext::new(&config, &auth);
        let mut screen = loaded(&ctx);

        assert!(matches!(screen.close_order(), ScreenAction::Request(_)));
        let action = screen
            .handle_response(
                ApiResponse::OrderClosed {
                    order_id: "order-1".to_string(),
                    result: Err(ApiError::Connect("refused".to_string())),
                },
                &ctx,
            )
            .unwrap();
        assert!(matches!(action, ScreenAction::Notify(_)));
        assert!(matches!(screen.close_order(), ScreenAction::Request(_)));
    }

    #[test]
    fn test_finish_requires_items() {
        let config = Config::default();
        let auth = AuthContext::new();
        let ctx = ScreenContext::new(&config, &auth);
        let mut screen = loaded(&ctx);

        assert!(matches!(
            screen.handle_event(key(KeyCode::Char('f')), &ctx).unwrap(),
            ScreenAction::Notify(_)
        ));

        let request = match screen.add_item() {
            ScreenAction::Request(ApiRequest::AddItem(request)) => request,
            other => panic!("expected AddItem, got {:?}", other),
        };
        screen
            .handle_response(
                ApiResponse::ItemAdded {
                    request,
                    result: Ok("100".to_string()),
                },
                &ctx,
            )
            .unwrap();

        match screen.handle_event(key(KeyCode::Char('f')), &ctx).unwrap() {
            ScreenAction::Navigate(Route::FinishOrder { ticket, items }) => {
                assert_eq!(ticket.number, 4);
                assert_eq!(items.len(), 1);
            }
            other => panic!("expected FinishOrder, got {:?}", other),
        }
    }

    #[test]
    fn test_finish_refused_while_delete_in_flight() {
        let config = Config::default();
        let auth = AuthContext::new();
        let ctx = ScreenContext::new(&config, &auth);
        let mut screen = loaded(&ctx);

        let request = match screen.add_item() {
            ScreenAction::Request(ApiRequest::AddItem(request)) => request,
            other => panic!("expected AddItem, got {:?}", other),
        };
        screen
            .handle_response(
                ApiResponse::ItemAdded {
                    request,
                    result: Ok("100".to_string()),
                },
                &ctx,
            )
            .unwrap();
        assert!(matches!(
            screen.handle_event(key(KeyCode::Char('d')), &ctx).unwrap(),
            ScreenAction::Request(ApiRequest::DeleteItem { .. })
        ));

        match screen.handle_event(key(KeyCode::Char('f')), &ctx).unwrap() {
            ScreenAction::Notify(toast) => {
                assert_eq!(toast.message, "Wait for pending items before finishing the order");
            }
            other => panic!("expected a toast, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_leaves_empty_order_open() {
        let config = Config::default();
        let auth = AuthContext::new();
        let ctx = ScreenContext::new(&config, &auth);
        let mut screen = loaded(&ctx);

        // First Esc closes the picker, the second leaves the screen
        screen.handle_event(key(KeyCode::Char('c')), &ctx).unwrap();
        assert!(screen.picker.is_some());
        assert!(matches!(
            screen.handle_event(key(KeyCode::Esc), &ctx).unwrap(),
            ScreenAction::None
        ));
        assert!(screen.picker.is_none());
        assert!(matches!(
            screen.handle_event(key(KeyCode::Esc), &ctx).unwrap(),
            ScreenAction::Back
        ));
        assert!(!screen.closing);
    }

    #[test]
    fn test_failed_categories_can_be_reloaded() {
        let config = Config::default();
        let auth = AuthContext::new();
        let ctx = ScreenContext::new(&config, &auth);
        let mut screen = screen();

        // Nothing to reload while the first fetch is running
        assert!(matches!(
            screen.handle_event(key(KeyCode::Char('r')), &ctx).unwrap(),
            ScreenAction::None
        ));

        let action = screen
            .handle_response(
                ApiResponse::Categories(Err(ApiError::Timeout("x".to_string()))),
                &ctx,
            )
            .unwrap();
        assert!(matches!(action, ScreenAction::Notify(_)));
        assert_eq!(screen.order().category(), &Selection::Empty);
        assert_eq!(screen.order().product(), &Selection::Empty);

        assert!(matches!(
            screen.handle_event(key(KeyCode::Char('r')), &ctx).unwrap(),
            ScreenAction::Request(ApiRequest::ListCategories)
        ));
        assert!(screen.order().category().is_loading());
    }
}
