//! Business services composing upstream data into item views.

pub mod items;

pub use items::ItemService;
