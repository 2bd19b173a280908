//! Output formatting for CLI.

mod json;
mod text;

pub use json::render_json;
pub use text::TextFormatter;
