//! Library exports for fitlog, shared between the binary and tests.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod guard;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod utils;
