pub mod api;
pub mod app;
pub mod call;
pub mod cli;
pub mod config;
pub mod db;
pub mod global;
pub mod pipeline;
pub mod vapi;
