pub mod item;

pub use item::{specifications_column, Item, Specifications};
