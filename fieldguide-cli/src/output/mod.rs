//! Output formatting for CLI.

mod json;
mod text;

pub use json::{GuidesOutput, JsonFormatter, OrdersOutput, SessionOutput, UpdateOutput, WarehouseOutput};
pub use text::TextFormatter;
