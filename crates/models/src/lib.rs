//! Storage entities for the service catalog.
//!
//! - `client`: customers owning services
//! - `service`: managed services with lifecycle status and health
//! - `activity`: append-only audit entries for service lifecycle events

pub mod errors;
pub mod db;
pub mod client;
pub mod service;
pub mod activity;
pub mod validation;

#[cfg(test)]
mod tests;
