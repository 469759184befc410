pub mod auth;
pub mod categories;
pub mod items;
pub mod logto;
pub mod products;
pub mod sample_data;
pub mod users;
