//! Order-building workflow.
//!
//! `OrderState` is the local mirror of one open order: the menu pickers, the
//! pending quantity and the line items the server has acknowledged. It never
//! talks to the network; callers take the requests it hands out, send them,
//! and feed the outcome back in. Items enter and leave the list only through
//! `confirm_added` / `confirm_deleted`.

use super::selection::Selection;
use crate::error::OrderError;
use crate::models::{AddItemRequest, Category, OrderItem, OrderTicket, Product};
use std::collections::HashSet;

/// Whether the order has any acknowledged items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStage {
    /// No items: the order may be closed.
    Empty,
    /// At least one item: the order may be finished.
    NonEmpty,
}

/// Parse the quantity typed by the user.
///
/// Surrounding whitespace is ignored; anything that is not a whole number
/// greater than zero is rejected.
pub fn parse_amount(text: &str) -> Result<u32, OrderError> {
    let trimmed = text.trim();
    match trimmed.parse::<u32>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(OrderError::InvalidAmount(trimmed.to_string())),
    }
}

#[derive(Debug, Clone)]
pub struct OrderState {
    ticket: OrderTicket,
    categories: Vec<Category>,
    category: Selection<Category>,
    products: Vec<Product>,
    product: Selection<Product>,
    /// Category whose products we are waiting for (or showing)
    requested_category: Option<String>,
    items: Vec<OrderItem>,
    pending_adds: usize,
    pending_deletes: HashSet<String>,
}

impl OrderState {
    pub fn new(ticket: OrderTicket) -> Self {
        Self {
            ticket,
            categories: Vec::new(),
            category: Selection::Loading,
            products: Vec::new(),
            product: Selection::Loading,
            requested_category: None,
            items: Vec::new(),
            pending_adds: 0,
            pending_deletes: HashSet::new(),
        }
    }

    pub fn ticket(&self) -> &OrderTicket {
        &self.ticket
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self) -> &Selection<Category> {
        &self.category
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self) -> &Selection<Product> {
        &self.product
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn pending_adds(&self) -> usize {
        self.pending_adds
    }

    pub fn is_deleting(&self, item_id: &str) -> bool {
        self.pending_deletes.contains(item_id)
    }

    pub fn stage(&self) -> OrderStage {
        if self.items.is_empty() {
            OrderStage::Empty
        } else {
            OrderStage::NonEmpty
        }
    }

    /// Closing is offered only for an empty order with no add in flight.
    pub fn can_close(&self) -> bool {
        self.stage() == OrderStage::Empty && self.pending_adds == 0
    }

    /// Finishing needs items and no add or delete still in flight.
    pub fn can_finish(&self) -> bool {
        self.finish().is_ok()
    }

    fn has_requests_in_flight(&self) -> bool {
        self.pending_adds > 0 || !self.pending_deletes.is_empty()
    }

    // ------------------------------------------------------------------
    // Menu pickers
    // ------------------------------------------------------------------

    /// Apply the category list. The first category becomes the selection and
    /// its id is returned so the caller can fetch its products.
    pub fn load_categories(&mut self, categories: Vec<Category>) -> Option<String> {
        self.categories = categories;
        self.category = Selection::first_of(&self.categories);

        match self.category.selected() {
            Some(category) => {
                let id = category.id.clone();
                self.request_products(id.clone());
                Some(id)
            }
            None => {
                self.requested_category = None;
                self.products.clear();
                self.product = Selection::Empty;
                None
            }
        }
    }

    /// The category fetch failed. Both pickers fall back to `Empty`.
    pub fn categories_failed(&mut self) {
        self.categories.clear();
        self.category = Selection::Empty;
        self.requested_category = None;
        self.products.clear();
        self.product = Selection::Empty;
    }

    /// Start over with the menu: both pickers go back to `Loading` and any
    /// product response still on its way is discarded.
    pub fn reload_menu(&mut self) {
        self.categories.clear();
        self.category = Selection::Loading;
        self.requested_category = None;
        self.products.clear();
        self.product = Selection::Loading;
    }

    /// Pick the category at `index`. Returns the category id to fetch
    /// products for, or `None` when nothing changed.
    pub fn select_category(&mut self, index: usize) -> Option<String> {
        let category = self.categories.get(index)?.clone();
        if self
            .category
            .selected()
            .is_some_and(|current| current.id == category.id)
        {
            return None;
        }

        let id = category.id.clone();
        self.category = Selection::Selected(category);
        self.request_products(id.clone());
        Some(id)
    }

    fn request_products(&mut self, category_id: String) {
        self.requested_category = Some(category_id);
        self.products.clear();
        self.product = Selection::Loading;
    }

    /// Apply a product list fetched for `category_id`.
    ///
    /// Returns `false` (and changes nothing) when the response belongs to a
    /// category that has since been superseded.
    pub fn load_products(&mut self, category_id: &str, products: Vec<Product>) -> bool {
        if self.requested_category.as_deref() != Some(category_id) {
            return false;
        }
        self.products = products;
        self.product = Selection::first_of(&self.products);
        true
    }

    /// The product fetch for `category_id` failed. The picker falls back to
    /// `Empty` unless the failure belongs to a superseded category.
    pub fn products_failed(&mut self, category_id: &str) -> bool {
        if self.requested_category.as_deref() != Some(category_id) {
            return false;
        }
        self.products.clear();
        self.product = Selection::Empty;
        true
    }

    /// Pick the product at `index`.
    pub fn select_product(&mut self, index: usize) -> bool {
        match self.products.get(index) {
            Some(product) => {
                self.product = Selection::Selected(product.clone());
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Line items
    // ------------------------------------------------------------------

    /// Build the add request for the selected product and `amount_text`.
    /// The request counts as in flight until confirmed or failed.
    pub fn prepare_add(&mut self, amount_text: &str) -> Result<AddItemRequest, OrderError> {
        let product = self
            .product
            .selected()
            .ok_or(OrderError::NoProductSelected)?;
        let amount = parse_amount(amount_text)?;

        let request = AddItemRequest {
            order_id: self.ticket.order_id.clone(),
            product_id: product.id.clone(),
            amount,
            product_name: product.name.clone(),
        };
        self.pending_adds += 1;
        Ok(request)
    }

    /// The server accepted `request` and assigned it `item_id`.
    pub fn confirm_added(&mut self, request: AddItemRequest, item_id: String) -> &OrderItem {
        self.pending_adds = self.pending_adds.saturating_sub(1);
        self.items.push(request.into_item(item_id));
        &self.items[self.items.len() - 1]
    }

    /// The server rejected an add; nothing enters the list.
    pub fn add_failed(&mut self) {
        self.pending_adds = self.pending_adds.saturating_sub(1);
    }

    /// Mark `item_id` as being deleted. Returns `false` if the item is not
    /// in the list or a delete for it is already in flight.
    pub fn begin_delete(&mut self, item_id: &str) -> bool {
        if !self.items.iter().any(|item| item.id == item_id) {
            return false;
        }
        self.pending_deletes.insert(item_id.to_string())
    }

    /// The server deleted `item_id`. Returns whether an item was removed;
    /// an unknown id leaves the list untouched.
    pub fn confirm_deleted(&mut self, item_id: &str) -> bool {
        self.pending_deletes.remove(item_id);
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        self.items.len() < before
    }

    /// The server refused to delete `item_id`; the item stays.
    pub fn delete_failed(&mut self, item_id: &str) {
        self.pending_deletes.remove(item_id);
    }

    // ------------------------------------------------------------------
    // Leaving the order
    // ------------------------------------------------------------------

    /// Order id to delete when closing an empty order.
    pub fn close_request(&self) -> Result<String, OrderError> {
        if !self.items.is_empty() {
            return Err(OrderError::OrderNotEmpty);
        }
        if self.pending_adds > 0 {
            return Err(OrderError::AddInFlight);
        }
        Ok(self.ticket.order_id.clone())
    }

    /// Ticket to forward to the finish step. No server call is involved.
    pub fn finish(&self) -> Result<OrderTicket, OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::NoItems);
        }
        if self.has_requests_in_flight() {
            return Err(OrderError::RequestsInFlight);
        }
        Ok(self.ticket.clone())
    }
}
