//! Configuration
//!
//! Shared types, built-in rule tables, settings and validation.

pub mod presets;
pub mod settings;
pub mod types;
pub mod validator;
