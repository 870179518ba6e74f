//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod batch;
pub mod sample;
pub mod validate;
pub mod verify;
