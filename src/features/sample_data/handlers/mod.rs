pub mod sample_data_handler;

pub use sample_data_handler::{__path_generate_sample_data, generate_sample_data};
