//! Backend worker: owns the async client and runs UI commands against it.

pub mod commands;
pub mod runtime;
