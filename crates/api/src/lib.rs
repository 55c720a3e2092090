//! HTTP API: server wiring, routing, and request/response mapping for the
//! inventory dashboard.

pub mod app;
pub mod config;
pub mod middleware;
