//! Core domain types for the Reelvault video service.
//!
//! This crate holds the pieces shared by every other crate: the unified
//! [`AppError`] type with its HTTP metadata, the environment-driven
//! [`Config`], domain constants, and the video record model.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
