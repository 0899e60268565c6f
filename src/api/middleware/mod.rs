//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Write guard — bearer-token check in front of every mutating method
//! 2. Request logger — method, path, status

pub mod auth;
pub mod log;
