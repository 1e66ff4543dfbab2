#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod email_client;
pub mod notifications;
mod routes;
pub mod startup;
pub mod store;
pub mod telemetry;
mod utils;
