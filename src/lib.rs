//! Interactive builder for ngrok agent configuration files.

pub mod config;
pub mod editor;
pub mod logging;
pub mod prompt;
