//! Lucra signal service
//!
//! Two stateless HTTP endpoints that wrap upstream price data and an upstream
//! analysis service into versioned signal envelopes.

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use error::{Result, SignalError};
