// Reusable UI widgets

pub mod picker;
pub mod spinner;
pub mod text_input;
pub mod toast;

pub use picker::Picker;
pub use spinner::Spinner;
pub use text_input::{TextInputWidget, TextInputWidgetExt};
pub use toast::{Toast, ToastManager, ToastVariant, ToastWidget};
