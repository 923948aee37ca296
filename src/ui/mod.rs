pub mod formatting;

pub use formatting::{format_html, format_json, format_params, format_text};
