//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Rewrite configuration (roots, excluded names, options)
//! - Error taxonomy
//! - Event model and rendering
//! - Path helpers
//! - File reading with encoding strategies

pub mod config;
pub mod error;
pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
