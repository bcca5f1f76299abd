//! Marketlens: equity price retrieval and technical indicator derivation.

pub mod common;
pub mod config;
pub mod core;
pub mod export;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod services;
