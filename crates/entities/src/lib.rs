//! Core entity definitions for the user directory.
//!
//! This crate defines the user record persisted by the store and the
//! payloads clients send to create and update it.

mod user;

pub use user::*;
