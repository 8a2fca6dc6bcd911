//! Library surface of the dressform CLI.
//!
//! The binary in `main.rs` only parses arguments; everything it
//! dispatches to lives under [`commands`] so the pieces stay testable.

pub mod commands;
pub mod measurement_args;
