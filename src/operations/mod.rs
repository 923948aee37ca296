pub mod backend_ops;

pub use backend_ops::open_resolver;
