//! # Display Module
//!
//! This module provides display-specific configurations.
//!
//! ## Modules
//!
//! - [`config`]: Serial settings and model geometry

pub mod config;

pub use config::{BaudMode, DisplayModel, LcdConfig};
