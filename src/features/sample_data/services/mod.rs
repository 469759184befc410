pub mod sample_data_service;

pub use sample_data_service::SampleDataService;
