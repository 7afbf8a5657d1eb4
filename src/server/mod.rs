//! Server module for building the pizza HTTP server
//!
//! This module provides a `ServerBuilder` that wires the configuration and a
//! `PizzaService` into a `ServerHost`, then exposes it over REST.

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
