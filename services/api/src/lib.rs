//! Study Path API Library Crate
//!
//! This library contains the web layer around the learning-path engine:
//! configuration, application state, request models, handlers and routing.
//! The `api` binary is a thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
