//! folio site service library.
//!
//! This crate primarily ships a `folio-site` binary, but we expose a small
//! library surface to enable integration testing.

pub mod api;
pub mod config;
pub mod state;
