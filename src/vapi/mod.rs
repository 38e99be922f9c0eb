//! Voice assistant gateway for the Vapi API.
//!
//! `client` speaks the provider's REST protocol and reports wire-level
//! failures as [`ProviderError`]. `gateway` turns those into the uniform
//! [`GatewayResult`] that handlers and the CLI consume.

pub mod assistant;
pub mod client;
pub mod error;
pub mod gateway;

pub use assistant::{Assistant, AssistantConfig, AssistantTemplate};
pub use client::{AssistantProvider, ProviderFuture, VapiClient};
pub use error::{GatewayError, Operation, ProviderError};
pub use gateway::{AssistantGateway, GatewayResult};
