pub mod admin_item_handler;
pub mod item_handler;
