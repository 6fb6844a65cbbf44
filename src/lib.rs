pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod render;
pub mod server;

pub use error::{Error, Result};
