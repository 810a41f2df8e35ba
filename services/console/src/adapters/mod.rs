pub mod auth;
pub mod gateway;

pub use auth::{verify_credentials, AuthStore};
pub use gateway::HttpBotGateway;
