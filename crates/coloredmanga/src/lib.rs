#[macro_use]
extern crate log;

pub mod config;
pub mod date;
pub mod document;
pub mod error;
pub mod numbering;
pub mod parser;
pub mod source;

pub use config::Config;
pub use error::SourceError;
pub use source::{ColoredManga, source_info};
