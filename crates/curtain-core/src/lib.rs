//! Core library for Curtain.
//!
//! Holds the maintenance store (status flag and IP whitelist, persisted as two
//! JSON documents through `curtain-storage`) and the renderer for the
//! maintenance overlay script. Nothing in this crate knows about HTTP.

pub mod error;
pub mod model;
pub mod script;
pub mod store;
