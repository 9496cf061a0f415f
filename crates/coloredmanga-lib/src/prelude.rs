pub use crate::models::*;
pub use crate::traits::Extension;
