//! Authentication against the portal backend.

pub mod gateway;

pub use gateway::{AuthGateway, LoginCredentials, RegisterAck};
