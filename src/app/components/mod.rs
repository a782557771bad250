//! Shared UI components.

pub mod card;
pub mod error_alert;
pub mod form_inputs;
pub mod layout;
pub mod status;
pub mod tab_bar;

pub use card::{Card, CardHeader};
pub use error_alert::{Alert, AlertMessage};
pub use form_inputs::TextField;
pub use layout::Layout;
pub use status::{EmptyState, ErrorView, LoadingView};
pub use tab_bar::TabBar;
