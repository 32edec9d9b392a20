// src/lib.rs

//! Eatery menu library: weekly menu parsing and a revisioned menu cache.

pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
