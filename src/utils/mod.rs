//! Utility functions and helpers.

pub mod http;
pub mod log;
pub mod text;
pub mod time;
