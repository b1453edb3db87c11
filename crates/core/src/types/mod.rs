//! Shared value types.

mod page;
mod price;

pub use page::Page;
pub use price::Price;
