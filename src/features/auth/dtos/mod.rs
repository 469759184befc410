pub mod auth_dto;

pub use auth_dto::{
    AuthResponseDto, AuthUserDto, CurrentUserDto, LoginRequestDto, RefreshTokenRequestDto,
    RefreshTokenResponseDto, RegisterRequestDto,
};
