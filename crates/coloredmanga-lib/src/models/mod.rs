pub mod source_info;
pub use source_info::*;

pub mod manga;
pub use manga::*;

pub mod chapter;
pub use chapter::*;
