mod logto_auth_client;

pub use logto_auth_client::{LogtoAuthClient, LogtoUserResponse};
