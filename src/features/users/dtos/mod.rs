pub mod profile_dto;

pub use profile_dto::{NewUserProfile, UpdateProfileDto, UserProfileDto};
