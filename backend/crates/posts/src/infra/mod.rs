//! Posts Infrastructure Layer
//!
//! Database-backed repository implementations.

pub mod postgres;
