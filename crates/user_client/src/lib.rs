//! HTTP client for the user directory API.
//!
//! Mirrors the operations the web client performs against `/api/users`.

mod client;
mod error;

pub use client::*;
pub use error::*;
