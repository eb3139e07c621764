//! Session authentication: named verification strategies and token issuance.

pub mod errors;
pub mod models;
pub mod strategy;
pub mod token;

pub use errors::AuthError;
pub use models::Credentials;
pub use models::StrategyInput;
pub use models::StrategyName;
pub use strategy::StrategyRegistry;
pub use token::TokenIssuer;
