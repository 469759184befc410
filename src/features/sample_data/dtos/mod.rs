pub mod sample_data_dto;

pub use sample_data_dto::SampleDataReportDto;
