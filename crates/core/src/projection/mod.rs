//! Rota projection: engine, post-filters, ports, and the board service.

pub mod engine;
pub mod filters;
pub mod ports;
pub mod service;
