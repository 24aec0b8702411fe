//! Aspas: on-device profile onboarding.

pub mod cli;
pub mod config;
pub mod error;
pub mod onboarding;
pub mod picture;
pub mod store;
