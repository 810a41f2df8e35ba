//! services/console/src/lib.rs
//!
//! The Botverse admin console: a command-line client for the Botverse REST
//! API. The `adapters` module holds the HTTP gateway and the file-backed
//! auth store; `app` holds the CLI surface and the per-screen flows.

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
