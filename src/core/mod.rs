// src/core/mod.rs
//! Shared services: configuration and the outbound API client

pub mod config_manager;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use service_client::{ScrapeReply, ServiceClient, ServiceRejection};
