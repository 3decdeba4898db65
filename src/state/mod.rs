//! Screen-independent state.
//!
//! Pure data plus transitions; nothing here performs IO, which keeps the
//! order rules testable without a terminal or a server.

pub mod order;
pub mod selection;

pub use order::{parse_amount, OrderStage, OrderState};
pub use selection::Selection;
