//! CLI command handlers, one per file.

mod add;
mod check;
mod preview;

pub use add::run_add;
pub use check::run_check;
pub use preview::run_preview;
