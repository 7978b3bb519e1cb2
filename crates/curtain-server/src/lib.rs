//! Curtain HTTP server.
//!
//! Wires the maintenance store and storage backend into an Axum router. The
//! JSON API lives under `/maintenance/*`, the admin page at `/`.

pub mod client_ip;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
