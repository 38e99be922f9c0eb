//! API route modules.

pub mod assistants;
pub mod call;
pub mod webhook;
pub mod webinars;
