//! Application entry points shared by the binaries

pub mod http;

pub use http::*;
