pub mod category;

pub use category::{Category, CategoryNames, CategoryWithCount};
