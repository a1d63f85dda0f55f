//! rpc-repl Library
//!
//! This is the library interface for rpc-repl.
//! The main binary is in src/main.rs.

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
