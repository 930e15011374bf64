//! # hwp-export-core
//!
//! Core crate for the HWP export workspace. Contains the configuration
//! schemas, the unified error system, and the traits through which the
//! export plugin talks to its host (workspace, settings storage, notices).
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
