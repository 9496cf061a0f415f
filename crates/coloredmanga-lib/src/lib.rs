pub mod models;
pub mod prelude;
pub mod traits;

/// This is used to ensure both host and extension use the same record shapes
pub static LIB_VERSION: &str = env!("CARGO_PKG_VERSION");
