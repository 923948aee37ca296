pub mod config_handlers;
pub mod field_handlers;
pub mod render_handlers;

pub use config_handlers::{configure, validate_config, ConfigureArgs};
pub use field_handlers::{print_fields, print_indexes};
pub use render_handlers::render_block;
