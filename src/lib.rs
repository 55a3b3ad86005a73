// src/lib.rs

//! boardlog: reconstructs what changed on a project board in a time window.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
