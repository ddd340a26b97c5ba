//! Command implementations

pub mod agents;
pub mod auth;
pub mod config;
pub mod credentials;
pub mod explore;
pub mod prompt;
pub mod teams;
pub mod version;
